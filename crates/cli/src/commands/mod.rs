//! Command handlers for the MedQA CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod repl;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use repl::ReplCommand;

use medqa_core::{AppConfig, AppError, AppResult};
use medqa_resolve::{ResolutionMode, Retrieval};

/// Maximum characters of each document shown in the context preview.
const CONTEXT_PREVIEW_LEN: usize = 400;

/// Resolve per-command knobs against the loaded configuration.
///
/// Command flags win over config values; ranges are enforced here so both
/// front-ends share the same validation.
pub(crate) fn resolve_settings(
    config: &AppConfig,
    mode: Option<&str>,
    threshold: Option<f32>,
    top_k: Option<usize>,
) -> AppResult<(ResolutionMode, f32, usize)> {
    let mode_str = mode.unwrap_or(&config.mode);
    let mode = ResolutionMode::parse(mode_str).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown resolution mode: {}. Supported: hybrid, dataset-only, api-only",
            mode_str
        ))
    })?;

    let threshold = threshold.unwrap_or(config.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AppError::Config(format!(
            "Similarity threshold must be within [0, 1], got {}",
            threshold
        )));
    }

    let top_k = top_k.unwrap_or(config.top_k);
    if !(1..=10).contains(&top_k) {
        return Err(AppError::Config(format!(
            "top-k must be within [1, 10], got {}",
            top_k
        )));
    }

    Ok((mode, threshold, top_k))
}

/// Print the retrieved context block the way the front-ends render it.
pub(crate) fn render_context(retrieval: &Retrieval) {
    if retrieval.is_empty() {
        println!("(no documents retrieved)");
        return;
    }

    for (i, (doc, score)) in retrieval.docs.iter().zip(&retrieval.scores).enumerate() {
        println!("Doc {} (score {:.3})", i + 1, score);
        println!("{}", preview(doc));
        println!("---");
    }
}

/// Truncate a document for preview display.
fn preview(doc: &str) -> String {
    if doc.len() <= CONTEXT_PREVIEW_LEN {
        return doc.to_string();
    }

    // Cut on a char boundary at or below the preview limit
    let mut end = CONTEXT_PREVIEW_LEN;
    while !doc.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &doc[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_settings_defaults_from_config() {
        let config = AppConfig::default();
        let (mode, threshold, top_k) = resolve_settings(&config, None, None, None).unwrap();

        assert_eq!(mode, ResolutionMode::Hybrid);
        assert_eq!(threshold, config.threshold);
        assert_eq!(top_k, config.top_k);
    }

    #[test]
    fn test_resolve_settings_flag_overrides() {
        let config = AppConfig::default();
        let (mode, threshold, top_k) =
            resolve_settings(&config, Some("api-only"), Some(0.7), Some(5)).unwrap();

        assert_eq!(mode, ResolutionMode::ApiOnly);
        assert_eq!(threshold, 0.7);
        assert_eq!(top_k, 5);
    }

    #[test]
    fn test_resolve_settings_rejects_bad_ranges() {
        let config = AppConfig::default();
        assert!(resolve_settings(&config, None, Some(1.5), None).is_err());
        assert!(resolve_settings(&config, None, None, Some(0)).is_err());
        assert!(resolve_settings(&config, None, None, Some(11)).is_err());
        assert!(resolve_settings(&config, Some("oracle"), None, None).is_err());
    }

    #[test]
    fn test_preview_truncates_long_documents() {
        let long = "x".repeat(500);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert!(shown.len() <= CONTEXT_PREVIEW_LEN + 3);

        assert_eq!(preview("short"), "short");
    }
}
