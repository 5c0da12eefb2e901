use std::collections::HashMap;

use async_trait::async_trait;

use rusty_calldata_core::{blob, selector_of, DecodeError, SignatureResolver};

/// Fixed selector table, for offline decoding
#[derive(Debug, Clone, Default)]
pub struct InMemorySignatureRegistry {
    signatures: HashMap<String, Vec<String>>,
}

impl InMemorySignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `signature` under its own selector
    pub fn register(&mut self, signature: &str) -> Result<&mut Self, DecodeError> {
        let selector = selector_of(signature)?.to_string();
        let entry = self.signatures.entry(selector).or_default();
        if !entry.iter().any(|s| s == signature) {
            entry.push(signature.to_owned());
        }
        Ok(self)
    }

    /// Replace the signatures listed under `selector`
    pub fn insert(&mut self, selector: &str, signatures: Vec<String>) {
        self.signatures.insert(blob::normalize(selector), signatures);
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[async_trait]
impl SignatureResolver for InMemorySignatureRegistry {
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        Ok(self
            .signatures
            .get(&blob::normalize(selector))
            .cloned()
            .unwrap_or_default())
    }
}
