use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use docqa_client::{
    AskError, AskOutcome, AskRequest, ClientConfig, Document, HttpQaService, Panel, QaService,
    QuestionAnswer, SessionController, Skip, UploadError, UploadOutcome,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct ReceivedFile {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Default)]
struct MockService {
    upload_failure: Option<StatusCode>,
    ask_failure: Option<StatusCode>,
    incomplete_answers: bool,
    uploads: Mutex<Vec<ReceivedFile>>,
    asks: Mutex<Vec<AskRequest>>,
}

async fn mock_upload(State(mock): State<Arc<MockService>>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let received = ReceivedFile {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().map(str::to_string),
            content_type: field.content_type().map(str::to_string),
            bytes: field.bytes().await.unwrap().to_vec(),
        };
        mock.uploads.lock().unwrap().push(received);
    }

    if let Some(status) = mock.upload_failure {
        return (status, Json(json!({"detail": "Unexpected error: boom"}))).into_response();
    }

    let name = mock
        .uploads
        .lock()
        .unwrap()
        .last()
        .and_then(|file| file.file_name.clone());
    Json(json!({
        "id": "doc1",
        "name": name,
        "timestamp": "2024-03-01T10:00:00.123456"
    }))
    .into_response()
}

async fn mock_ask(State(mock): State<Arc<MockService>>, Json(request): Json<AskRequest>) -> Response {
    mock.asks.lock().unwrap().push(request.clone());

    if let Some(status) = mock.ask_failure {
        return (status, Json(json!({"detail": "Document not found"}))).into_response();
    }

    let id = uuid::Uuid::new_v4().to_string();
    if mock.incomplete_answers {
        return Json(json!({"id": id, "question": request.question})).into_response();
    }

    Json(json!({
        "id": id,
        "question": request.question,
        "answer": "$500",
        "timestamp": "2024-03-01T10:00:01.000001"
    }))
    .into_response()
}

async fn spawn_mock_service(mock: Arc<MockService>) -> String {
    let app = Router::new()
        .route("/upload", post(mock_upload))
        .route("/ask", post(mock_ask))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn controller_for(mock: Arc<MockService>) -> SessionController<HttpQaService> {
    let base_url = spawn_mock_service(mock).await;
    SessionController::new(HttpQaService::new(ClientConfig::new(base_url)))
}

fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[tokio::test]
async fn upload_sends_pdf_as_multipart_file_field() {
    let mock = Arc::new(MockService::default());
    let controller = controller_for(mock.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.pdf", b"%PDF-1.7 fixture");

    let outcome = controller.open_path(&path).await.unwrap();

    let UploadOutcome::Uploaded(document) = outcome else {
        panic!("expected an upload, got {:?}", outcome);
    };
    assert_eq!(document.id, "doc1");
    assert_eq!(document.label(), "report.pdf");

    let uploads = mock.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, "file");
    assert_eq!(uploads[0].file_name.as_deref(), Some("report.pdf"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(uploads[0].bytes, b"%PDF-1.7 fixture");
}

#[tokio::test]
async fn upload_then_ask_round_trip() {
    let mock = Arc::new(MockService::default());
    let controller = controller_for(mock.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.pdf", b"%PDF-1.7");

    controller.drop_paths(&[path]).await.unwrap();
    let session = controller.snapshot();
    assert_eq!(session.panel(), Panel::Chat);
    assert!(session.history.is_empty());

    controller.set_question("What is the total?");
    let outcome = controller.submit_question().await.unwrap();

    let AskOutcome::Answered(answer) = outcome else {
        panic!("expected an answer, got {:?}", outcome);
    };
    assert_eq!(answer.question, "What is the total?");
    assert_eq!(answer.answer, "$500");

    let session = controller.snapshot();
    assert_eq!(session.history, vec![answer]);
    assert_eq!(session.question, "");
    assert_eq!(
        mock.asks.lock().unwrap().clone(),
        vec![AskRequest {
            document_id: "doc1".to_string(),
            question: "What is the total?".to_string(),
        }]
    );
}

#[tokio::test]
async fn server_error_on_upload_leaves_no_document() {
    let mock = Arc::new(MockService {
        upload_failure: Some(StatusCode::INTERNAL_SERVER_ERROR),
        ..MockService::default()
    });
    let controller = controller_for(mock).await;
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "report.pdf", b"%PDF-1.7");

    let err = controller.open_path(&path).await.unwrap_err();

    match &err {
        UploadError::Status { status, detail } => {
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(detail, "Unexpected error: boom");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
    let session = controller.snapshot();
    assert_eq!(session.panel(), Panel::Upload);
    assert_eq!(session.document, None);
    assert!(!session.uploading);
}

#[tokio::test]
async fn rejected_question_keeps_input() {
    let mock = Arc::new(MockService {
        ask_failure: Some(StatusCode::NOT_FOUND),
        ..MockService::default()
    });
    let controller = controller_for(mock).await;
    let dir = tempfile::tempdir().unwrap();
    controller
        .open_path(&write_fixture(&dir, "report.pdf", b"%PDF-1.7"))
        .await
        .unwrap();

    controller.set_question("What is the total?");
    let err = controller.submit_question().await.unwrap_err();

    assert!(matches!(err, AskError::Status { .. }));
    let session = controller.snapshot();
    assert!(session.history.is_empty());
    assert_eq!(session.question, "What is the total?");
}

#[tokio::test]
async fn answer_without_required_fields_is_an_ask_error() {
    let mock = Arc::new(MockService {
        incomplete_answers: true,
        ..MockService::default()
    });
    let service = HttpQaService::new(ClientConfig::new(spawn_mock_service(mock).await));

    let err = service
        .ask(AskRequest {
            document_id: "doc1".to_string(),
            question: "What is the total?".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AskError::Decode(_)));
}

#[tokio::test]
async fn unreachable_service_is_an_upload_error() {
    let service = HttpQaService::new(ClientConfig::new("http://127.0.0.1:1"));

    let err = service
        .upload(docqa_client::PdfFile::new("report.pdf", b"%PDF-1.7".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::Transport(_)));
}

#[tokio::test]
async fn dropped_text_file_never_reaches_the_service() {
    let mock = Arc::new(MockService::default());
    let controller = controller_for(mock.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let notes = write_fixture(&dir, "notes.txt", b"not a pdf");
    let report = write_fixture(&dir, "report.pdf", b"%PDF-1.7");

    let outcome = controller.drop_paths(&[notes, report]).await.unwrap();

    assert_eq!(outcome, UploadOutcome::Skipped(Skip::NotPdf));
    assert!(mock.uploads.lock().unwrap().is_empty());
    assert_eq!(controller.snapshot().document, None::<Document>);
}

#[tokio::test]
async fn history_accumulates_in_order() {
    let mock = Arc::new(MockService::default());
    let controller = controller_for(mock).await;
    let dir = tempfile::tempdir().unwrap();
    controller
        .open_path(&write_fixture(&dir, "report.pdf", b"%PDF-1.7"))
        .await
        .unwrap();

    for question in ["First?", "Second?"] {
        controller.set_question(question);
        controller.submit_question().await.unwrap();
    }

    let questions: Vec<String> = controller
        .snapshot()
        .history
        .into_iter()
        .map(|qa: QuestionAnswer| qa.question)
        .collect();
    assert_eq!(questions, vec!["First?", "Second?"]);
}
