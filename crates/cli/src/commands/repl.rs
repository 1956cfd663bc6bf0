//! Repl command handler.
//!
//! Interactive front-end: reads queries in a loop and resolves each one
//! through the same pipeline as the one-shot `ask` command. The pipeline is
//! assembled once; provider tier discovery is not repeated per query.

use std::io::{BufRead, Write};

use clap::Args;
use medqa_core::{config::AppConfig, AppResult};
use medqa_resolve::{resolver::EMPTY_QUERY_MESSAGE, ResolutionMode};

use crate::commands::{render_context, resolve_settings};
use crate::runtime::QaRuntime;

/// Interactive question-answering loop
#[derive(Args, Debug)]
pub struct ReplCommand {
    /// Resolution mode (hybrid, dataset-only, api-only)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Similarity threshold for dataset routing (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Number of documents to retrieve (1-10)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Show the retrieved context before each answer
    #[arg(long)]
    pub show_context: bool,
}

impl ReplCommand {
    /// Execute the repl command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing repl command");

        let (mode, threshold, top_k) = resolve_settings(
            config,
            self.mode.as_deref(),
            self.threshold,
            self.top_k,
        )?;

        let runtime = QaRuntime::build(config)?;

        println!("MedQA interactive mode ({}). Type 'exit' to quit.", mode.as_str());

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("medqa> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break; // EOF
            };
            let query = line?;
            let query = query.trim();

            if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                break;
            }

            if query.is_empty() {
                println!("{}", EMPTY_QUERY_MESSAGE);
                continue;
            }

            let resolved = runtime.answer(query, mode, threshold, top_k).await;

            if self.show_context && mode != ResolutionMode::ApiOnly {
                println!("Retrieved context:");
                render_context(&resolved.retrieval);
                println!();
            }

            println!("{}", resolved.answer);
            println!();
        }

        Ok(())
    }
}
