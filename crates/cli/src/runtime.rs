//! Runtime assembly for the front-end commands.
//!
//! Builds the collaborator graph once per invocation (probe-once provider
//! discovery included) and exposes the per-query answering flow shared by
//! the `ask` and `repl` front-ends.

use std::sync::Arc;

use medqa_core::{AppConfig, AppResult};
use medqa_dataset::{Corpus, ExtractiveGenerator, KeywordRetriever, OllamaGenerator};
use medqa_resolve::{
    routes_external, AnswerResolver, ContextGenerator, InteractionLogger, ResolutionMode,
    Retrieval, Retriever,
};
use medqa_search::{EncyclopediaClient, ExternalAnswerChain, ProviderClient};

/// One fully resolved interaction, ready for rendering.
pub struct ResolvedAnswer {
    /// Final answer text
    pub answer: String,

    /// The local retrieval the routing decision was based on
    pub retrieval: Retrieval,

    /// Whether the external path produced the answer
    pub external: bool,
}

/// Assembled answering pipeline shared by the front-ends.
pub struct QaRuntime {
    retriever: Arc<dyn Retriever>,
    resolver: AnswerResolver,
    journal: InteractionLogger,
}

impl QaRuntime {
    /// Build the pipeline from configuration.
    ///
    /// A missing corpus file is tolerated: retrieval then always comes back
    /// empty and every query routes externally.
    pub fn build(config: &AppConfig) -> AppResult<Self> {
        let corpus_path = config.corpus_path();
        let corpus = if corpus_path.exists() {
            Corpus::load(&corpus_path)?
        } else {
            tracing::warn!(
                "no corpus at {:?}; all queries will route externally",
                corpus_path
            );
            Corpus::default()
        };

        let retriever: Arc<dyn Retriever> = Arc::new(KeywordRetriever::new(corpus));

        let generator: Arc<dyn ContextGenerator> = match config.generator.as_str() {
            "ollama" => Arc::new(OllamaGenerator::new(
                &config.ollama_endpoint,
                &config.ollama_model,
            )),
            _ => Arc::new(ExtractiveGenerator),
        };

        // Provider tier discovery happens exactly once, here.
        let provider = ProviderClient::discover(config.serpapi_key.clone());
        let chain = ExternalAnswerChain::new(EncyclopediaClient::new(), provider);

        let resolver = AnswerResolver::new(generator, Arc::new(chain));
        let journal = InteractionLogger::new(config.journal_path());

        Ok(Self {
            retriever,
            resolver,
            journal,
        })
    }

    /// Answer one query: retrieve, route, resolve, journal.
    ///
    /// Retrieval failures degrade to an empty retrieval (which routes the
    /// query externally) rather than aborting the interaction.
    pub async fn answer(
        &self,
        query: &str,
        mode: ResolutionMode,
        threshold: f32,
        top_k: usize,
    ) -> ResolvedAnswer {
        let retrieval = match self.retriever.retrieve_top_k(query, top_k).await {
            Ok(retrieval) => retrieval,
            Err(e) => {
                tracing::warn!("local retrieval failed: {}", e);
                Retrieval::empty()
            }
        };

        let external = routes_external(mode, &retrieval.scores, threshold);
        let answer = self.resolver.resolve(query, mode, &retrieval, threshold).await;

        self.journal.append(query, &answer);

        ResolvedAnswer {
            answer,
            retrieval,
            external,
        }
    }
}
