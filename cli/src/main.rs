mod commands;
mod render;
mod repl;
mod script;

use anyhow::Result;
use docqa_client::{ClientConfig, HttpQaService, SessionController};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = ClientConfig::from_env();
    log::info!("Using document service at {}", config.base_url);

    let controller = Arc::new(SessionController::new(HttpQaService::new(config)));

    let mut args = std::env::args().skip(1);
    match args.next() {
        Some(path) => script::run(&controller, &PathBuf::from(path), args.collect()).await,
        None => repl::run(controller).await,
    }
}
