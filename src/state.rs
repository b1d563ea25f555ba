use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{Config, LlmConfig};
use crate::llm::hashed::HashedVectorizer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub llm_config: Arc<RwLock<LlmConfig>>,
    /// Degraded-mode vectorizer; process-wide fitted state.
    pub hashed: Arc<HashedVectorizer>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm_config = config.llm.clone();
        let embedding_dim = config.llm.embedding_dim;

        Ok(Self {
            config,
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            llm_config: Arc::new(RwLock::new(llm_config)),
            hashed: Arc::new(HashedVectorizer::new(embedding_dim)),
        })
    }
}
