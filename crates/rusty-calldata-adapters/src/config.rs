use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const FOUR_BYTE_DIRECTORY_URL: &str = "https://www.4byte.directory";
pub const SOURCIFY_LOOKUP_URL: &str =
    "https://api.4byte.sourcify.dev/signature-database/v1/lookup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryKind {
    /// 4byte.directory, oldest registrations first
    #[default]
    FourByteDirectory,
    /// Sourcify signature database
    Sourcify,
}

impl RegistryKind {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::FourByteDirectory => FOUR_BYTE_DIRECTORY_URL,
            Self::Sourcify => SOURCIFY_LOOKUP_URL,
        }
    }
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FourByteDirectory => "4byte",
            Self::Sourcify => "sourcify",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown registry '{0}' (expected '4byte' or 'sourcify')")]
pub struct UnknownRegistry(pub String);

impl FromStr for RegistryKind {
    type Err = UnknownRegistry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "4byte" | "4byte.directory" => Ok(Self::FourByteDirectory),
            "sourcify" => Ok(Self::Sourcify),
            other => Err(UnknownRegistry(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub registry: RegistryKind,
    /// Overrides the registry's public endpoint
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    /// Consecutive connectivity failures before lookups short-circuit
    pub max_failed_requests: usize,
    pub max_cached_selectors: usize,
}

impl ResolverConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.registry.default_base_url())
            .trim_end_matches('/')
    }

    pub fn lookup_url(&self, selector: &str) -> String {
        match self.registry {
            RegistryKind::FourByteDirectory => format!(
                "{}/api/v1/signatures/?ordering=created_at&hex_signature={}",
                self.base_url(),
                selector
            ),
            RegistryKind::Sourcify => {
                format!("{}?function={}&filter=true", self.base_url(), selector)
            }
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            registry: RegistryKind::default(),
            base_url: None,
            timeout_ms: 10_000,
            max_failed_requests: 3,
            max_cached_selectors: 1_000,
        }
    }
}
