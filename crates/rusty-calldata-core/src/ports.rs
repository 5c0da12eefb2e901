use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::blob;
use crate::error::DecodeError;

/// Source of human-readable signatures for a 4-byte selector
#[async_trait]
pub trait SignatureResolver: Send + Sync {
    /// Known signatures for `selector` (`0x` + 8 lowercase hex digits),
    /// in the registry's own order. No match is `Ok(vec![])`.
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError>;
}

#[async_trait]
impl<T: SignatureResolver + ?Sized> SignatureResolver for Arc<T> {
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        (**self).lookup(selector).await
    }
}

#[async_trait]
impl<T: SignatureResolver + ?Sized> SignatureResolver for Box<T> {
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        (**self).lookup(selector).await
    }
}

/// Candidate signatures for the selector prefix of `blob`
pub async fn resolve<R: SignatureResolver + ?Sized>(
    resolver: &R,
    blob: &str,
) -> Result<Vec<String>, DecodeError> {
    let selector = blob::selector_prefix(blob)
        .ok_or_else(|| DecodeError::Lookup(format!("no selector in '{}'", blob)))?;
    resolver.lookup(&selector).await
}

/// Like [`resolve`], with every failure treated as "no candidates"
pub async fn candidate_signatures<R: SignatureResolver + ?Sized>(
    resolver: &R,
    blob: &str,
) -> Vec<String> {
    if blob::selector_prefix(blob).is_none() {
        debug!(blob, "no selector to look up");
        return vec![];
    }
    match resolve(resolver, blob).await {
        Ok(signatures) => signatures,
        Err(e) => {
            warn!(error = %e, "signature lookup failed, leaving value undecoded");
            vec![]
        }
    }
}
