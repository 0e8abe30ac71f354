use crate::error::{AskError, UploadError};
use crate::models::{AskRequest, Document, QuestionAnswer};
use crate::pdf_file::PdfFile;
use std::future::Future;

/// The two operations the document question-answering service exposes.
pub trait QaService: Send + Sync {
    fn upload(&self, file: PdfFile) -> impl Future<Output = Result<Document, UploadError>> + Send;

    fn ask(&self, request: AskRequest) -> impl Future<Output = Result<QuestionAnswer, AskError>> + Send;
}
