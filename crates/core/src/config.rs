//! Configuration management for the MedQA CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables (optionally populated from a `.env` dotfile)
//! - Command-line flags
//! - Config files (.medqa/config.yaml)
//!
//! The configuration is workspace-centric, with most state stored in `.medqa/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default similarity threshold for dataset-vs-API routing.
pub const DEFAULT_THRESHOLD: f32 = 0.4;

/// Default number of documents retrieved per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .medqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// SerpAPI credential; `None` means "not configured", which is a
    /// first-class state handled by the search chain, never an error
    pub serpapi_key: Option<String>,

    /// Similarity threshold in [0, 1] compared against the best
    /// retrieval score to decide dataset-vs-API routing
    pub threshold: f32,

    /// Number of documents to retrieve per query (1-10)
    pub top_k: usize,

    /// Default resolution mode ("hybrid", "dataset-only", "api-only")
    pub mode: String,

    /// Answer generator for the dataset path ("extractive" or "ollama")
    pub generator: String,

    /// Ollama endpoint for the LLM-backed generator
    pub ollama_endpoint: String,

    /// Ollama model identifier
    pub ollama_model: String,

    /// Path to the local corpus file (defaults to .medqa/corpus.jsonl)
    pub corpus_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    resolution: Option<ResolutionConfig>,
    generator: Option<GeneratorConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResolutionConfig {
    mode: Option<String>,
    threshold: Option<f32>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
    corpus: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeneratorConfig {
    kind: Option<String>,
    endpoint: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            serpapi_key: None,
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            mode: "hybrid".to_string(),
            generator: "extractive".to_string(), // Local-first default
            ollama_endpoint: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2".to_string(),
            corpus_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `MEDQA_WORKSPACE`: Override workspace path
    /// - `MEDQA_CONFIG`: Path to config file
    /// - `SERPAPI_KEY` (or the legacy lowercase `serpapi_key`): provider credential
    /// - `MEDQA_CORPUS`: Path to the local corpus file
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use medqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Load from environment variables
        if let Ok(workspace) = std::env::var("MEDQA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("MEDQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Validate workspace exists
        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.workspace.join(".medqa/config.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        config.serpapi_key = std::env::var("SERPAPI_KEY")
            .or_else(|_| std::env::var("serpapi_key"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        if let Ok(corpus) = std::env::var("MEDQA_CORPUS") {
            config.corpus_file = Some(PathBuf::from(corpus));
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        // Check for NO_COLOR environment variable
        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        // Merge workspace settings
        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        // Merge logging settings
        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        // Merge resolution settings
        if let Some(resolution) = config_file.resolution {
            if let Some(mode) = resolution.mode {
                result.mode = mode;
            }
            if let Some(threshold) = resolution.threshold {
                result.threshold = threshold;
            }
            if let Some(top_k) = resolution.top_k {
                result.top_k = top_k;
            }
            if let Some(corpus) = resolution.corpus {
                result.corpus_file = Some(PathBuf::from(corpus));
            }
        }

        // Merge generator settings
        if let Some(generator) = config_file.generator {
            if let Some(kind) = generator.kind {
                result.generator = kind;
            }
            if let Some(endpoint) = generator.endpoint {
                result.ollama_endpoint = endpoint;
            }
            if let Some(model) = generator.model {
                result.ollama_model = model;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .medqa directory.
    pub fn medqa_dir(&self) -> PathBuf {
        self.workspace.join(".medqa")
    }

    /// Ensure the .medqa directory exists.
    pub fn ensure_medqa_dir(&self) -> AppResult<()> {
        let medqa_dir = self.medqa_dir();
        if !medqa_dir.exists() {
            std::fs::create_dir_all(&medqa_dir).map_err(|e| {
                AppError::Config(format!("Failed to create .medqa directory: {}", e))
            })?;
        }
        Ok(())
    }

    /// Path to the local corpus file.
    pub fn corpus_path(&self) -> PathBuf {
        self.corpus_file
            .clone()
            .unwrap_or_else(|| self.medqa_dir().join("corpus.jsonl"))
    }

    /// Path to the append-only interaction journal.
    pub fn journal_path(&self) -> PathBuf {
        self.medqa_dir().join("logs/answers.log")
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(AppError::Config(format!(
                "Similarity threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }

        if !(1..=10).contains(&self.top_k) {
            return Err(AppError::Config(format!(
                "top_k must be within [1, 10], got {}",
                self.top_k
            )));
        }

        let known_modes = ["hybrid", "dataset-only", "api-only"];
        if !known_modes.contains(&self.mode.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown resolution mode: {}. Supported: {}",
                self.mode,
                known_modes.join(", ")
            )));
        }

        let known_generators = ["extractive", "ollama"];
        if !known_generators.contains(&self.generator.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown generator: {}. Supported: {}",
                self.generator,
                known_generators.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.mode, "hybrid");
        assert_eq!(config.generator, "extractive");
        assert!(config.serpapi_key.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_medqa_dir() {
        let config = AppConfig::default();
        let medqa_dir = config.medqa_dir();
        assert!(medqa_dir.ends_with(".medqa"));
    }

    #[test]
    fn test_corpus_path_default() {
        let config = AppConfig::default();
        assert!(config.corpus_path().ends_with(".medqa/corpus.jsonl"));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(None, None, None, true, false);

        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut config = AppConfig::default();
        config.threshold = 1.5;
        assert!(config.validate().is_err());

        config.threshold = 0.4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_top_k_range() {
        let mut config = AppConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());

        config.top_k = 11;
        assert!(config.validate().is_err());

        config.top_k = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_mode() {
        let mut config = AppConfig::default();
        config.mode = "oracle".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "resolution:\n  mode: api-only\n  threshold: 0.6\n  topK: 5\ngenerator:\n  kind: ollama\n  model: llama3\n",
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.mode, "api-only");
        assert_eq!(merged.threshold, 0.6);
        assert_eq!(merged.top_k, 5);
        assert_eq!(merged.generator, "ollama");
        assert_eq!(merged.ollama_model, "llama3");
    }
}
