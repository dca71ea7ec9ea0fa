//! Smoke test for the configured Gemini key.
//!
//! Usage:
//!   cargo run --bin check_gemini
//!   cargo run --bin check_gemini -- --prompt "Give me a short productivity tip."

use anyhow::Result;
use clap::Parser;
use digital_twin::clients::{CompletionService, GeminiClient};
use digital_twin::config::Config;

#[derive(Parser)]
#[command(name = "check_gemini")]
#[command(about = "Send one prompt to Gemini with the configured key", long_about = None)]
struct Cli {
    #[arg(long, default_value = "Give me a short productivity tip.")]
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match config.runtime.gemini_api_key.as_deref() {
        Some(key) => {
            let shown: String = key.chars().take(6).collect();
            println!("Key loaded: {}...", shown);
        }
        None => println!("Key loaded: <none>"),
    }

    let client = GeminiClient::with_options(
        config.runtime.gemini_api_key.clone(),
        config.completion.model.clone(),
        config.completion.base_url.clone(),
        config.completion.timeout_ms,
    )?;

    match client.complete(&cli.prompt).await {
        Ok(completion) => {
            println!("Success ({}):", client.model());
            println!("{}", completion.text);
            Ok(())
        }
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
