//! HTTP signature registry client with caching
//!
//! Supports 4byte.directory (`/api/v1/signatures/`) and the Sourcify
//! Signature Database (`/signature-database/v1/lookup`). Results keep the
//! registry's order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use rusty_calldata_core::{blob, DecodeError, SignatureResolver};

use crate::config::{RegistryKind, ResolverConfig};

/// Acquire mutex lock, recovering from poisoned state if necessary.
macro_rules! lock_or_recover {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("signature cache mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    };
}

#[derive(Debug, Deserialize)]
struct FourByteResponse {
    results: Vec<FourByteEntry>,
}

#[derive(Debug, Deserialize)]
struct FourByteEntry {
    text_signature: String,
}

#[derive(Debug, Deserialize)]
struct SourcifyResponse {
    ok: bool,
    result: SourcifyResult,
}

#[derive(Debug, Deserialize)]
struct SourcifyResult {
    #[serde(default)]
    function: HashMap<String, Option<Vec<SourcifyEntry>>>,
}

#[derive(Debug, Deserialize)]
struct SourcifyEntry {
    name: String,
}

/// Signature registry over HTTP
///
/// After `max_failed_requests` consecutive connectivity failures (timeout,
/// transport error, 5xx) the registry is marked spurious and lookups fail
/// fast until [`HttpSignatureRegistry::reset_spurious`].
#[derive(Clone)]
pub struct HttpSignatureRegistry {
    config: ResolverConfig,
    http: reqwest::Client,
    cache: Arc<Mutex<HashMap<String, Vec<String>>>>,
    is_spurious: Arc<AtomicBool>,
    failed_count: Arc<AtomicUsize>,
}

impl HttpSignatureRegistry {
    pub fn with_config(config: ResolverConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            config,
            http,
            cache: Arc::new(Mutex::new(HashMap::new())),
            is_spurious: Arc::new(AtomicBool::new(false)),
            failed_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn is_spurious(&self) -> bool {
        self.is_spurious.load(Ordering::Relaxed)
    }

    pub fn reset_spurious(&self) {
        self.is_spurious.store(false, Ordering::Relaxed);
        self.failed_count.store(0, Ordering::Relaxed);
    }

    pub fn is_cached(&self, selector: &str) -> bool {
        lock_or_recover!(self.cache).contains_key(&blob::normalize(selector))
    }

    pub fn cached_count(&self) -> usize {
        lock_or_recover!(self.cache).len()
    }

    fn on_success(&self) {
        self.failed_count.store(0, Ordering::Relaxed);
    }

    fn on_connectivity_failure(&self) {
        let count = self.failed_count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(count, max = self.config.max_failed_requests, "registry request failed");
        if count >= self.config.max_failed_requests {
            warn!(count, "marking signature registry as spurious");
            self.is_spurious.store(true, Ordering::Relaxed);
        }
    }

    fn remember(&self, selector: String, signatures: &[String]) {
        let mut cache = lock_or_recover!(self.cache);
        if cache.len() >= self.config.max_cached_selectors && !cache.contains_key(&selector) {
            debug!(%selector, "signature cache full, not caching");
            return;
        }
        cache.insert(selector, signatures.to_vec());
    }

    async fn fetch(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        let url = self.config.lookup_url(selector);
        debug!(%url, "querying signature registry");

        let response = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    self.on_connectivity_failure();
                }
                return Err(DecodeError::Lookup(format!(
                    "request to {} failed: {}",
                    self.config.registry, e
                )));
            }
        };

        let status = response.status();
        if !status.is_success() {
            if status.is_server_error() {
                self.on_connectivity_failure();
            }
            return Err(DecodeError::Lookup(format!(
                "{} returned {}",
                self.config.registry, status
            )));
        }

        let signatures = match self.config.registry {
            RegistryKind::FourByteDirectory => {
                let body: FourByteResponse = response.json().await.map_err(|e| {
                    DecodeError::Lookup(format!("failed to parse 4byte response: {e}"))
                })?;
                body.results.into_iter().map(|r| r.text_signature).collect()
            }
            RegistryKind::Sourcify => {
                let mut body: SourcifyResponse = response.json().await.map_err(|e| {
                    DecodeError::Lookup(format!("failed to parse Sourcify response: {e}"))
                })?;
                if !body.ok {
                    return Err(DecodeError::Lookup("Sourcify returned ok=false".to_owned()));
                }
                body.result
                    .function
                    .remove(selector)
                    .flatten()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|e| e.name)
                    .collect()
            }
        };

        self.on_success();
        Ok(signatures)
    }
}

#[async_trait]
impl SignatureResolver for HttpSignatureRegistry {
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        if self.is_spurious() {
            return Err(DecodeError::Lookup(format!(
                "{} marked unavailable after repeated failures",
                self.config.registry
            )));
        }

        let selector = blob::normalize(selector);
        let cached = lock_or_recover!(self.cache).get(&selector).cloned();
        if let Some(hit) = cached {
            debug!(%selector, count = hit.len(), "signature cache hit");
            return Ok(hit);
        }

        let signatures = self.fetch(&selector).await?;
        debug!(%selector, count = signatures.len(), "fetched signatures");
        self.remember(selector, &signatures);
        Ok(signatures)
    }
}
