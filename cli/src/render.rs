use docqa_client::{Panel, QuestionAnswer, Session};

pub fn panel(session: &Session) -> String {
    match (session.panel(), &session.document) {
        (Panel::Chat, Some(document)) => {
            let mut out = format!("📄 Chatting about {}", document.label());
            if let Some(timestamp) = &document.timestamp {
                out.push_str(&format!(" (uploaded {})", timestamp));
            }
            if session.asking {
                out.push_str("\n⏳ Waiting for an answer...");
            }
            out
        }
        _ => {
            if session.uploading {
                "⏳ Uploading...".to_string()
            } else {
                "📤 Open or drop a PDF to start (:open <path>, :drop <path>)".to_string()
            }
        }
    }
}

pub fn answer(qa: &QuestionAnswer) -> String {
    format!("Q: {}\nA: {}", qa.question, qa.answer)
}

pub fn history(session: &Session) -> String {
    if session.history.is_empty() {
        return "No questions asked yet.".to_string();
    }

    session
        .history
        .iter()
        .enumerate()
        .map(|(i, qa)| format!("{}. {}", i + 1, answer(qa)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn prompt(session: &Session) -> &'static str {
    match session.panel() {
        Panel::Upload => "upload> ",
        Panel::Chat => "ask> ",
    }
}
