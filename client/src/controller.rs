use crate::error::{AskError, UploadError};
use crate::models::{AskRequest, Document, QuestionAnswer};
use crate::pdf_file::{self, PdfFile};
use crate::service::QaService;
use crate::session::Session;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Why a request was not sent, or why its answer was not kept. Skips are
/// silent: no notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    NoFile,
    NotPdf,
    Uploading,
    NoDocument,
    EmptyQuestion,
    Asking,
    /// The answer arrived after another document replaced the one asked about.
    StaleDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(Document),
    Skipped(Skip),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Answered(QuestionAnswer),
    Skipped(Skip),
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Upload,
    Ask,
}

/// Owns the session and runs the upload and ask flows against a service.
///
/// Each flow is single-flight: while one upload (or ask) is outstanding a
/// second one of the same kind is skipped. The session lock is never held
/// across a request.
pub struct SessionController<S> {
    service: S,
    state: Mutex<Session>,
}

/// Busy flag for one operation kind, cleared on drop.
struct InFlight<'a> {
    state: &'a Mutex<Session>,
    operation: Operation,
}

impl<'a> InFlight<'a> {
    fn claim(state: &'a Mutex<Session>, operation: Operation) -> Option<Self> {
        let mut session = lock(state);
        let flag = match operation {
            Operation::Upload => &mut session.uploading,
            Operation::Ask => &mut session.asking,
        };
        if *flag {
            return None;
        }
        *flag = true;
        Some(Self { state, operation })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut session = lock(self.state);
        match self.operation {
            Operation::Upload => session.uploading = false,
            Operation::Ask => session.asking = false,
        }
    }
}

fn lock(state: &Mutex<Session>) -> MutexGuard<'_, Session> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: QaService> SessionController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(Session::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn snapshot(&self) -> Session {
        lock(&self.state).clone()
    }

    pub fn set_question(&self, text: impl Into<String>) {
        lock(&self.state).question = text.into();
    }

    /// File-picker selection: sent regardless of its declared type.
    pub async fn pick_file(&self, file: PdfFile) -> Result<UploadOutcome, UploadError> {
        self.run_upload(move || async move { Ok(file) }).await
    }

    /// Drop: only the first file counts, and only if it declares itself a PDF.
    pub async fn drop_files(&self, files: Vec<PdfFile>) -> Result<UploadOutcome, UploadError> {
        let Some(file) = files.into_iter().next() else {
            return Ok(UploadOutcome::Skipped(Skip::NoFile));
        };
        if !file.is_pdf() {
            log::debug!("Ignoring dropped file {} ({})", file.name, file.mime_type);
            return Ok(UploadOutcome::Skipped(Skip::NotPdf));
        }
        self.pick_file(file).await
    }

    pub async fn open_path(&self, path: &Path) -> Result<UploadOutcome, UploadError> {
        self.run_upload(|| PdfFile::load(path)).await
    }

    /// Same rules as `drop_files`, deciding on the file name before reading.
    pub async fn drop_paths(&self, paths: &[PathBuf]) -> Result<UploadOutcome, UploadError> {
        let Some(path) = paths.first() else {
            return Ok(UploadOutcome::Skipped(Skip::NoFile));
        };
        if !pdf_file::declares_pdf(path) {
            log::debug!("Ignoring dropped path {}", path.display());
            return Ok(UploadOutcome::Skipped(Skip::NotPdf));
        }
        self.open_path(path).await
    }

    async fn run_upload<F, Fut>(&self, load: F) -> Result<UploadOutcome, UploadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PdfFile, UploadError>>,
    {
        let Some(_busy) = InFlight::claim(&self.state, Operation::Upload) else {
            log::debug!("Upload already in progress");
            return Ok(UploadOutcome::Skipped(Skip::Uploading));
        };

        let result = match load().await {
            Ok(file) => self.service.upload(file).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(document) => {
                lock(&self.state).adopt(document.clone());
                Ok(UploadOutcome::Uploaded(document))
            }
            Err(e) => {
                log::error!("Error uploading file: {}", e);
                Err(e)
            }
        }
    }

    /// Sends the current question input about the held document.
    pub async fn submit_question(&self) -> Result<AskOutcome, AskError> {
        let request = {
            let session = lock(&self.state);
            let Some(document) = session.document.as_ref() else {
                return Ok(AskOutcome::Skipped(Skip::NoDocument));
            };
            let question = session.trimmed_question();
            if question.is_empty() {
                return Ok(AskOutcome::Skipped(Skip::EmptyQuestion));
            }
            AskRequest {
                document_id: document.id.clone(),
                question: question.to_string(),
            }
        };

        let Some(_busy) = InFlight::claim(&self.state, Operation::Ask) else {
            log::debug!("Question already in flight");
            return Ok(AskOutcome::Skipped(Skip::Asking));
        };

        let document_id = request.document_id.clone();
        match self.service.ask(request).await {
            Ok(answer) => {
                let mut session = lock(&self.state);
                let current = session.document.as_ref().map(|d| d.id.as_str());
                if current != Some(document_id.as_str()) {
                    log::warn!(
                        "Dropping answer {} for document {}, no longer held",
                        answer.id,
                        document_id
                    );
                    return Ok(AskOutcome::Skipped(Skip::StaleDocument));
                }
                session.record(answer.clone());
                Ok(AskOutcome::Answered(answer))
            }
            Err(e) => {
                log::error!("Error asking question: {}", e);
                Err(e)
            }
        }
    }
}
