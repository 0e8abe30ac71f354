use crate::models::{Document, QuestionAnswer};

/// Which view the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Upload,
    Chat,
}

/// In-memory state of one client session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub document: Option<Document>,
    pub history: Vec<QuestionAnswer>,
    pub question: String,
    pub uploading: bool,
    pub asking: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        if self.document.is_some() {
            Panel::Chat
        } else {
            Panel::Upload
        }
    }

    pub fn trimmed_question(&self) -> &str {
        self.question.trim()
    }

    pub fn can_submit(&self) -> bool {
        !self.asking && !self.trimmed_question().is_empty()
    }

    /// A new document starts a new conversation.
    pub(crate) fn adopt(&mut self, document: Document) {
        self.document = Some(document);
        self.history.clear();
    }

    pub(crate) fn record(&mut self, answer: QuestionAnswer) {
        self.history.push(answer);
        self.question.clear();
    }
}
