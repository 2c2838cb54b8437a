//! stepchain — o1-style reasoning chains from a local Ollama model.
//!
//! Wires the pieces together: env config, the Ollama client behind the
//! retrying fetcher, the three-pass chain, and the incremental printer.

mod chain;
mod config;
mod llm;
mod render;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use chain::ReasoningChain;
use config::ChainConfig;
use llm::client::OllamaClient;
use llm::StepFetcher;
use render::StepPrinter;

#[derive(Parser)]
#[command(
    name = "stepchain",
    about = "o1-style reasoning chains from a local Ollama model"
)]
struct Cli {
    /// Query to reason about. Reads queries interactively when omitted.
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ChainConfig::from_env()?;

    println!("Current configuration:");
    println!("  endpoint: {}", config.endpoint);
    println!("  model:    {}", config.model);
    println!();

    if let Some(query) = cli.query {
        run_query(&config, &query).await?;
        return Ok(());
    }

    println!("Enter a query (e.g. How many 'R's are in the word strawberry?). Ctrl-D exits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("query> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        run_query(&config, query).await?;
        println!();
    }

    Ok(())
}

/// Run one query through the chain, rendering updates as they land.
async fn run_query(config: &ChainConfig, query: &str) -> Result<()> {
    let client = OllamaClient::new(config.endpoint.clone(), config.model.clone());
    let chain = ReasoningChain::new(StepFetcher::new(Box::new(client)));

    let (tx, mut rx) = mpsc::channel(16);
    let query = query.to_string();
    let worker = tokio::spawn(async move { chain.run(&query, tx).await });

    let mut printer = StepPrinter::new();
    while let Some(update) = rx.recv().await {
        printer.render(&update)?;
    }
    worker.await?;
    Ok(())
}
