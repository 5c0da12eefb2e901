//! Calldata decoding into a tree of labeled values
//!
//! Given a hex blob, candidate signatures are looked up by selector, the
//! arguments are decoded with alloy's ABI codec, and any argument that is
//! itself calldata (MultiSend batches, Safe `execTransaction` data) is
//! decoded again, producing a tree rather than a flat list.

pub mod abi;
pub mod blob;
pub mod decoder;
pub mod error;
pub mod multisend;
pub mod ports;
pub mod postprocess;
pub mod types;

pub use abi::{decode_arguments, parse_signature, selector_of};
pub use decoder::Decoder;
pub use error::DecodeError;
pub use multisend::{unpack, PackedFormat, PackedTransaction};
pub use ports::{candidate_signatures, resolve, SignatureResolver};
pub use postprocess::{classify, CallKind, EXEC_TRANSACTION_SELECTOR, MULTISEND_SELECTOR};
pub use types::{DecodedNode, DecodedSubtree, RawValue};
