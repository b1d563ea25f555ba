//! # rag-gateway
//!
//! A Rust microservice providing the retrieval-support half of a RAG stack:
//! text embedding, query understanding, hybrid re-ranking, and grounded
//! LLM generation. Vector storage and nearest-neighbor search live in an
//! external vector database; this service turns its raw similarity hits
//! into a trustworthy, ranked context set and constrains the LLM to it.
//!
//! ## Pipeline
//!
//! ```text
//!   ┌───────────┐     ┌───────────────┐     ┌────────────────┐
//!   │ Raw query │────▶│ QueryExpander │────▶│ TextNormalizer │
//!   └───────────┘     │  (synonyms)   │     └───────┬────────┘
//!                     └───────────────┘             │
//!                                                   ▼
//!                                        ┌────────────────────┐
//!                                        │ embed (Ollama /    │
//!                                        │ OpenAI / hashed)   │
//!                                        └─────────┬──────────┘
//!                                                  │ vector search
//!                                                  │ (external DB)
//!                                                  ▼
//!                                        ┌────────────────────┐
//!                                        │   HybridReranker   │
//!                                        │ 0.50 vector sim    │
//!                                        │ 0.25 keyword       │
//!                                        │ 0.15 exact phrase  │
//!                                        │ 0.05 length        │
//!                                        │ 0.05 first chunk   │
//!                                        └─────────┬──────────┘
//!                                                  │ top-k passages
//!                                                  ▼
//!                                        ┌────────────────────┐
//!                                        │ GroundedPrompt +   │
//!                                        │ GenerationInvoker  │
//!                                        └────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, LLM backends,
//!   and generation sampling parameters
//! - [`error`] - Error taxonomy and the uniform `{success, ...}` JSON envelope
//! - [`models`] - Shared data types: `ScoredCandidate`, `RankedResult`,
//!   `ContextDoc`
//! - [`text`] - Whitespace/character normalization applied identically to
//!   corpus and query text
//! - [`query`] - Synonym-table query expansion and intent classification
//! - [`rerank`] - The hybrid five-signal re-ranking scorer
//! - [`prompt`] - Grounded prompt assembly with the context-only contract
//! - [`llm`] - Clients for the external embedding and generation
//!   capabilities, plus the degraded-mode hashed vectorizer
//! - [`api`] - Axum HTTP handlers for the six endpoints
//! - [`state`] - Shared application state (HTTP client, runtime LLM config)

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod query;
pub mod rerank;
pub mod state;
pub mod text;
