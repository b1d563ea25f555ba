use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// LLM backend configuration
    pub llm: LlmConfig,
    /// Generation sampling parameters
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Generation provider: "ollama" or "openai"
    pub provider: String,
    /// Embedding provider: "ollama", "openai", or "hashed" (degraded
    /// in-process vectorizer, no model required)
    pub embedding_provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for answer generation
    pub generation_model: String,
    /// Model name for embeddings
    pub embedding_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
}

/// Fixed, task-tuned sampling parameters for grounded generation.
/// Low temperature and tight nucleus sampling keep answers factual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_tokens: u32,
    /// Stop sequences that cut the model off before it hallucinates a
    /// continued dialogue.
    pub stop: Vec<String>,
    /// Persona line embedded at the top of the grounded prompt.
    pub persona: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5001".to_string(),
            llm: LlmConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            embedding_provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            generation_model: "phi3:3.8b".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            api_key: None,
            embedding_dim: 768,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_k: 20,
            top_p: 0.85,
            max_tokens: 512,
            stop: vec![
                "\n\nUSER:".to_string(),
                "\n\nQuestion:".to_string(),
                "Context".to_string(),
            ],
            persona: "an intelligent assistant answering questions from a curated knowledge base"
                .to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("RAG_GATEWAY_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(provider) = std::env::var("LLM_EMBEDDING_PROVIDER") {
            config.llm.embedding_provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_GENERATION_MODEL") {
            config.llm.generation_model = model;
        }
        if let Ok(model) = std::env::var("LLM_EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("LLM_EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.llm.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("GENERATION_TEMPERATURE") {
            if let Ok(v) = val.parse() {
                config.generation.temperature = v;
            }
        }
        if let Ok(val) = std::env::var("GENERATION_TOP_K") {
            if let Ok(v) = val.parse() {
                config.generation.top_k = v;
            }
        }
        if let Ok(val) = std::env::var("GENERATION_TOP_P") {
            if let Ok(v) = val.parse() {
                config.generation.top_p = v;
            }
        }
        if let Ok(val) = std::env::var("GENERATION_MAX_TOKENS") {
            if let Ok(v) = val.parse() {
                config.generation.max_tokens = v;
            }
        }
        if let Ok(persona) = std::env::var("GENERATION_PERSONA") {
            config.generation.persona = persona;
        }

        config
    }
}
