pub mod config;
pub mod http;
pub mod memory;

pub use config::{RegistryKind, ResolverConfig, UnknownRegistry};
pub use http::HttpSignatureRegistry;
pub use memory::InMemorySignatureRegistry;
