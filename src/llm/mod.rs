pub mod embeddings;
pub mod generate;
pub mod hashed;
