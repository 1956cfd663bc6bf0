//! Ask command handler.
//!
//! One-shot front-end: collect a query, resolve it through the dataset or
//! the external chain, render the result, journal the interaction.

use clap::Args;
use medqa_core::{config::AppConfig, AppResult};
use medqa_resolve::{resolver::EMPTY_QUERY_MESSAGE, ResolutionMode};
use std::path::PathBuf;

use crate::commands::{render_context, resolve_settings};
use crate::runtime::QaRuntime;

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "query")]
    pub file: Option<PathBuf>,

    /// Resolution mode (hybrid, dataset-only, api-only)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Similarity threshold for dataset routing (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Number of documents to retrieve (1-10)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Show the retrieved context before the answer
    #[arg(long)]
    pub show_context: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let (mode, threshold, top_k) = resolve_settings(
            config,
            self.mode.as_deref(),
            self.threshold,
            self.top_k,
        )?;

        let query = self.get_query();
        let query = query.as_deref().map(str::trim).unwrap_or_default();

        // Invalid input is a user-visible warning, not an error, and must
        // never trigger a network call.
        if query.is_empty() {
            tracing::warn!("empty query rejected before resolution");
            println!("{}", EMPTY_QUERY_MESSAGE);
            return Ok(());
        }

        let runtime = QaRuntime::build(config)?;
        let resolved = runtime.answer(query, mode, threshold, top_k).await;

        if self.json {
            let output = serde_json::json!({
                "answer": resolved.answer,
                "mode": mode.as_str(),
                "routedExternal": resolved.external,
                "maxScore": resolved.retrieval.max_score(),
                "retrievedCount": resolved.retrieval.docs.len(),
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| medqa_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        // Context preview is suppressed in API-only mode, which never
        // consults the retrieval.
        if self.show_context && mode != ResolutionMode::ApiOnly {
            println!("Retrieved context:");
            render_context(&resolved.retrieval);
            println!();
        }

        println!("{}", resolved.answer);

        Ok(())
    }

    /// Get the query text from the positional argument or a file.
    fn get_query(&self) -> Option<String> {
        self.query.clone().or_else(|| {
            self.file.as_ref().and_then(|path| {
                std::fs::read_to_string(path)
                    .map_err(|e| tracing::error!("Failed to read query file: {}", e))
                    .ok()
            })
        })
    }
}
