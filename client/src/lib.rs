pub mod config;
pub mod controller;
pub mod error;
pub mod http_service;
pub mod models;
pub mod pdf_file;
pub mod service;
pub mod session;

pub use config::ClientConfig;
pub use controller::{AskOutcome, SessionController, Skip, UploadOutcome};
pub use error::{AskError, UploadError};
pub use http_service::HttpQaService;
pub use models::*;
pub use pdf_file::PdfFile;
pub use service::QaService;
pub use session::{Panel, Session};
