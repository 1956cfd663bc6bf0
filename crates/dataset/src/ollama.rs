//! Ollama-backed answer generation.
//!
//! Synthesizes a natural-language answer from retrieved context through a
//! local Ollama runtime (https://github.com/ollama/ollama/blob/main/docs/api.md).

use medqa_core::{AppError, AppResult};
use medqa_resolve::ContextGenerator;
use serde::{Deserialize, Serialize};

/// Sampling temperature for factual answering.
const ANSWER_TEMPERATURE: f32 = 0.3;

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    system: String,
    temperature: f32,
    stream: bool,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// LLM-backed answer generator for the dataset path.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a generator against a custom Ollama endpoint.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// Join retrieved documents into a numbered context block.
fn build_context(docs: &[String]) -> String {
    docs.iter()
        .enumerate()
        .map(|(i, doc)| format!("[Document {}]\n{}", i + 1, doc))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// System prompt for grounded medical answering.
fn build_system_prompt() -> String {
    String::from(
        "You are a medical question answering assistant with access to a set of \
         patient and drug records.\n\n\
         Instructions:\n\
         - Answer based only on the context provided\n\
         - Do not refer to \"documents\", \"context\", or document numbers\n\
         - State the facts plainly without saying where they came from\n\
         - If the context does not contain the answer, say so clearly\n\
         - Keep the response concise and factual\n",
    )
}

#[async_trait::async_trait]
impl ContextGenerator for OllamaGenerator {
    async fn generate(&self, query: &str, docs: &[String]) -> AppResult<String> {
        tracing::debug!(model = %self.model, docs = docs.len(), "generating dataset answer");

        let prompt = format!(
            "User question:\n{}\n\nRelevant context from records:\n{}",
            query,
            build_context(docs)
        );

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            system: build_system_prompt(),
            temperature: ANSWER_TEMPERATURE,
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Dataset(format!("Failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Dataset(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AppError::Dataset(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(body.response)
    }
}
