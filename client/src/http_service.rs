use crate::config::ClientConfig;
use crate::error::{AskError, UploadError};
use crate::models::*;
use crate::pdf_file::PdfFile;
use crate::service::QaService;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

/// `QaService` over HTTP: `POST /upload` (multipart) and `POST /ask` (JSON).
pub struct HttpQaService {
    client: Client,
    config: ClientConfig,
}

impl HttpQaService {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl QaService for HttpQaService {
    async fn upload(&self, file: PdfFile) -> Result<Document, UploadError> {
        let url = self.config.endpoint("upload");
        log::info!("Uploading {} ({} bytes) to {}", file.name, file.bytes.len(), url);

        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let (status, detail) = read_failure(response).await;
            return Err(UploadError::Status { status, detail });
        }

        let body = response.bytes().await?;
        let document: Document = serde_json::from_slice(&body).map_err(UploadError::Decode)?;

        log::info!("Document {} ingested", document.id);
        Ok(document)
    }

    async fn ask(&self, request: AskRequest) -> Result<QuestionAnswer, AskError> {
        let url = self.config.endpoint("ask");
        log::info!("Asking about document {}", request.document_id);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let (status, detail) = read_failure(response).await;
            return Err(AskError::Status { status, detail });
        }

        let body = response.bytes().await?;
        let answer: QuestionAnswer = serde_json::from_slice(&body).map_err(AskError::Decode)?;

        log::info!("Received answer {}", answer.id);
        Ok(answer)
    }
}

/// Status plus the best description of the failure the body offers.
async fn read_failure(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response body>".to_string());

    let detail = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(error) => error.detail,
        Err(_) => text,
    };

    log::debug!("Service answered {}: {}", status, detail);
    (status, detail)
}
