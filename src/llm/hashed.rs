use std::hash::{Hash, Hasher};

use anyhow::{bail, Result};
use parking_lot::RwLock;
use twox_hash::XxHash64;

/// Degraded-mode statistical vectorizer: hashed TF-IDF over whitespace
/// tokens. Lets the service run without any embedding model, at the cost of
/// losing semantic similarity.
///
/// The fitted document-frequency state is process-wide and shared across
/// requests: `fit` takes the write lock, `encode` the read lock. This is the
/// one piece of shared mutable state in the system.
pub struct HashedVectorizer {
    dim: usize,
    fitted: RwLock<Option<FittedState>>,
}

struct FittedState {
    doc_count: usize,
    /// Documents containing at least one token hashing into each bucket.
    doc_freq: Vec<u32>,
}

fn bucket(token: &str, dim: usize) -> usize {
    let mut hasher = XxHash64::with_seed(0);
    token.hash(&mut hasher);
    (hasher.finish() as usize) % dim
}

impl HashedVectorizer {
    pub fn new(dim: usize) -> Self {
        Self {
            dim: dim.max(1),
            fitted: RwLock::new(None),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.read().is_some()
    }

    /// Fit document frequencies on a corpus, replacing any previous fit.
    pub fn fit(&self, corpus: &[String]) {
        let mut doc_freq = vec![0u32; self.dim];
        for text in corpus {
            let mut seen = vec![false; self.dim];
            for token in text.split_whitespace() {
                let idx = bucket(&token.to_lowercase(), self.dim);
                if !seen[idx] {
                    seen[idx] = true;
                    doc_freq[idx] += 1;
                }
            }
        }
        *self.fitted.write() = Some(FittedState {
            doc_count: corpus.len(),
            doc_freq,
        });
    }

    /// Encode texts as tf·idf vectors using the fitted state. Fails if `fit`
    /// has not run yet.
    pub fn encode(&self, texts: &[String], normalize: bool) -> Result<Vec<Vec<f32>>> {
        let guard = self.fitted.read();
        let Some(state) = guard.as_ref() else {
            bail!("Hashed vectorizer is not fitted; POST /embed a corpus first");
        };

        let n = state.doc_count as f32;
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0f32; self.dim];
                for token in text.split_whitespace() {
                    let idx = bucket(&token.to_lowercase(), self.dim);
                    // Smoothed idf, as a statistical vectorizer would compute it
                    let df = state.doc_freq[idx] as f32;
                    let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                    v[idx] += idf;
                }
                if normalize {
                    crate::llm::embeddings::l2_normalize(&mut v);
                }
                v
            })
            .collect())
    }
}
