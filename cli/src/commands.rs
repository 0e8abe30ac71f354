use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// File-picker style selection, no type filter.
    Open(PathBuf),
    /// Drag-and-drop style selection of one or more paths.
    Drop(Vec<PathBuf>),
    History,
    Help,
    Quit,
    Question(String),
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  :open <path>        upload a file (any type)
  :drop <path>...     upload the first path if it is a PDF
                      (paths are split on whitespace; use :open for
                      a path containing spaces)
  :history            show the questions asked about this document
  :help               show this help
  :quit               leave
Anything else is sent as a question once a document is loaded.
Start a question with :: to send it with a single leading colon.";

pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if let Some(literal) = trimmed.strip_prefix("::") {
        return Command::Question(format!(":{}", literal));
    }
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Question(line.to_string());
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "open" | "o" if !args.is_empty() => Command::Open(PathBuf::from(args)),
        "drop" | "d" => Command::Drop(args.split_whitespace().map(PathBuf::from).collect()),
        "history" | "h" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
