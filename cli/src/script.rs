use crate::render;
use anyhow::Result;
use docqa_client::{AskOutcome, QaService, SessionController, UploadOutcome};
use std::path::Path;

/// One-shot run: upload `path`, then ask each question in order.
pub async fn run<S: QaService>(
    controller: &SessionController<S>,
    path: &Path,
    questions: Vec<String>,
) -> Result<()> {
    println!("📤 Uploading {}", path.display());

    let outcome = match controller.open_path(path).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let notice = e.notice();
            return Err(anyhow::Error::new(e).context(notice));
        }
    };
    if let UploadOutcome::Skipped(reason) = outcome {
        anyhow::bail!("Upload was not sent: {:?}", reason);
    }
    println!("{}", render::panel(&controller.snapshot()));

    let mut failed = 0;
    for question in &questions {
        controller.set_question(question.as_str());
        match controller.submit_question().await {
            Ok(AskOutcome::Answered(qa)) => println!("\n{}", render::answer(&qa)),
            Ok(AskOutcome::Skipped(reason)) => log::warn!("Skipped {:?}: {:?}", question, reason),
            Err(e) => {
                eprintln!("\n⚠️  {}", e.notice());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} questions failed", failed, questions.len());
    }
    Ok(())
}
