//! CodeForge CLI
//!
//! Runs the development pipeline end-to-end for one coding task and prints
//! the final report. Stage progress is streamed to stderr via tracing.

use anyhow::Result;
use clap::Parser;
use codeforge_core::swarm::{run_development_pipeline, PipelineEvent, PipelineEventKind};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Run the CodeForge development pipeline for a coding task
#[derive(Parser, Debug)]
#[command(name = "codeforge", version, about)]
struct Args {
    /// The coding task to plan, implement, test, and review
    #[arg(
        long,
        default_value = "Create a Python function to check if a string is a palindrome."
    )]
    topic: String,

    /// Suppress per-stage progress lines
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(topic = %args.topic, "Starting CodeForge pipeline");

    let event_tx = if !args.quiet {
        let (tx, mut rx) = mpsc::channel::<PipelineEvent>(64);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event.kind {
                    PipelineEventKind::AgentStarted => {
                        eprintln!("→ {} working...", event.agent);
                    }
                    PipelineEventKind::AgentCompleted => {
                        eprintln!("✓ {} done", event.agent);
                    }
                    PipelineEventKind::AgentFailed => {
                        eprintln!("✗ {} failed", event.agent);
                    }
                    _ => {}
                }
            }
        });
        Some(tx)
    } else {
        None
    };

    let report = run_development_pipeline(&args.topic, event_tx).await?;
    println!("{}", report);
    Ok(())
}
