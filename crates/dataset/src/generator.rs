//! Extractive answer generation.
//!
//! The zero-dependency dataset answerer: it returns the retrieved document
//! texts directly, most relevant first. Useful offline and as the default
//! when no LLM runtime is configured.

use medqa_core::AppResult;
use medqa_resolve::ContextGenerator;

/// Message returned when the dataset path is taken with no documents.
const NO_LOCAL_ANSWER: &str = "I could not find this information in the local dataset.";

/// Answer generator that extracts text straight from retrieved documents.
pub struct ExtractiveGenerator;

#[async_trait::async_trait]
impl ContextGenerator for ExtractiveGenerator {
    async fn generate(&self, _query: &str, docs: &[String]) -> AppResult<String> {
        if docs.is_empty() {
            return Ok(NO_LOCAL_ANSWER.to_string());
        }

        Ok(docs.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_joins_documents_in_relevance_order() {
        let docs = vec!["most relevant".to_string(), "second".to_string()];
        let answer = ExtractiveGenerator.generate("q", &docs).await.unwrap();
        assert_eq!(answer, "most relevant\n\nsecond");
    }

    #[tokio::test]
    async fn test_empty_context_yields_no_answer_message() {
        let answer = ExtractiveGenerator.generate("q", &[]).await.unwrap();
        assert_eq!(answer, NO_LOCAL_ANSWER);
    }
}
