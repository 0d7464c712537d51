//! shmbot CLI: run the crocodile bot or inspect its word list. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use shmbot_cli::{load_config, run_bot, word_count, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Words { file } => handle_words(file),
    }
}

/// Handle the words command: logs go to the console only.
fn handle_words(file: Option<std::path::PathBuf>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();

    let count = word_count(file)?;
    println!("{} distinct words", count);
    Ok(())
}
