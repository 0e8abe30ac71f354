use docqa_client::{AskRequest, ClientConfig, HttpQaService, PdfFile, QaService};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| "report.pdf".to_string()));
    let question = args.next().unwrap_or_else(|| "What is this document about?".to_string());

    let service = HttpQaService::new(ClientConfig::from_env());
    println!("🔍 Testing DocQA service at {}", service.config().base_url);

    // Upload
    println!("\n📤 Upload:");
    let document = service.upload(PdfFile::load(&path).await?).await?;
    println!("Response: {}", serde_json::to_string_pretty(&document)?);

    // Ask
    println!("\n💬 Ask:");
    let answer = service
        .ask(AskRequest {
            document_id: document.id.clone(),
            question,
        })
        .await?;
    println!("Response: {}", serde_json::to_string_pretty(&answer)?);

    println!("\n✅ Client test completed!");
    Ok(())
}
