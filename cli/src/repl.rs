use crate::commands::{self, Command, HELP};
use crate::render;
use anyhow::Result;
use docqa_client::{
    AskError, AskOutcome, Panel, QaService, SessionController, UploadError, UploadOutcome,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

enum Selection {
    Picked(PathBuf),
    Dropped(Vec<PathBuf>),
}

/// Interactive session. Requests run on spawned tasks so the prompt keeps
/// accepting input; the controller's busy flags drop repeated submissions.
pub async fn run<S>(controller: Arc<SessionController<S>>) -> Result<()>
where
    S: QaService + 'static,
{
    println!("{}\n", render::panel(&controller.snapshot()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        show_prompt(&controller);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::History => println!("{}", render::history(&controller.snapshot())),
            Command::Open(path) => spawn_upload(controller.clone(), Selection::Picked(path)),
            Command::Drop(paths) => spawn_upload(controller.clone(), Selection::Dropped(paths)),
            Command::Question(text) => {
                let session = controller.snapshot();
                if session.panel() == Panel::Upload {
                    if !text.trim().is_empty() {
                        println!("{}", render::panel(&session));
                    }
                    continue;
                }
                if session.asking {
                    println!("⏳ Still waiting for the previous answer.");
                    continue;
                }
                controller.set_question(text);
                spawn_ask(controller.clone());
            }
            Command::Unknown(input) => println!("Unknown command {}, try :help", input),
        }
    }

    log::info!("Session closed");
    Ok(())
}

fn show_prompt<S: QaService>(controller: &SessionController<S>) {
    print!("{}", render::prompt(&controller.snapshot()));
    std::io::stdout().flush().ok();
}

fn spawn_upload<S>(controller: Arc<SessionController<S>>, selection: Selection)
where
    S: QaService + 'static,
{
    tokio::spawn(async move {
        let result = match &selection {
            Selection::Picked(path) => controller.open_path(path).await,
            Selection::Dropped(paths) => controller.drop_paths(paths).await,
        };
        report_upload(&controller, result);
    });
}

fn spawn_ask<S>(controller: Arc<SessionController<S>>)
where
    S: QaService + 'static,
{
    tokio::spawn(async move {
        let result = controller.submit_question().await;
        report_ask(&controller, result);
    });
}

fn report_upload<S: QaService>(
    controller: &SessionController<S>,
    result: Result<UploadOutcome, UploadError>,
) {
    match result {
        Ok(UploadOutcome::Uploaded(_)) => {
            println!("\n✅ {}", render::panel(&controller.snapshot()));
            show_prompt(controller);
        }
        Ok(UploadOutcome::Skipped(reason)) => log::debug!("Upload skipped: {:?}", reason),
        Err(e) => {
            eprintln!("\n⚠️  {}", e.notice());
            show_prompt(controller);
        }
    }
}

fn report_ask<S: QaService>(controller: &SessionController<S>, result: Result<AskOutcome, AskError>) {
    match result {
        Ok(AskOutcome::Answered(qa)) => {
            println!("\n{}\n", render::answer(&qa));
            show_prompt(controller);
        }
        Ok(AskOutcome::Skipped(reason)) => log::debug!("Question skipped: {:?}", reason),
        Err(e) => {
            eprintln!("\n⚠️  {}", e.notice());
            show_prompt(controller);
        }
    }
}
