//! Decode result tree

use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{hex, Address, Bytes, I256, U256};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A leaf value carried by a [`DecodedNode`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Bool(bool),
    Int(I256),
    Uint(U256),
    Address(Address),
    Bytes(Bytes),
    Text(String),
    List(Vec<RawValue>),
}

impl RawValue {
    /// Byte payload, if this value can be decoded again as calldata
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<DynSolValue> for RawValue {
    fn from(value: DynSolValue) -> Self {
        match value {
            DynSolValue::Bool(b) => Self::Bool(b),
            DynSolValue::Int(i, _) => Self::Int(i),
            DynSolValue::Uint(u, _) => Self::Uint(u),
            // bytesN is right-padded inside the word, keep the first `size` bytes
            DynSolValue::FixedBytes(word, size) => {
                Self::Bytes(Bytes::copy_from_slice(&word[..size.min(32)]))
            }
            DynSolValue::Address(a) => Self::Address(a),
            DynSolValue::Function(f) => Self::Bytes(Bytes::copy_from_slice(f.as_slice())),
            DynSolValue::Bytes(b) => Self::Bytes(Bytes::from(b)),
            DynSolValue::String(s) => Self::Text(s),
            DynSolValue::Array(items)
            | DynSolValue::FixedArray(items)
            | DynSolValue::Tuple(items) => Self::List(items.into_iter().map(Self::from).collect()),
            #[allow(unreachable_patterns)]
            other => Self::Text(format!("{other:?}")),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Address(a) => write!(f, "{a}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            other => serializer.collect_str(other),
        }
    }
}

/// One entry of the result tree.
///
/// `value` and `decoded` are not exclusive: a `Data` field keeps its raw
/// bytes and gains a nested decode once a signature is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_signatures: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<DecodedSubtree>,
    /// Rendering hint only
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsible: bool,
}

impl DecodedNode {
    pub fn leaf(value: RawValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn labeled(label: impl Into<String>, value: RawValue) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(value),
            ..Self::default()
        }
    }

    /// A purely structural node wrapping a subtree
    pub fn structural(decoded: DecodedSubtree) -> Self {
        Self {
            decoded: Some(decoded),
            ..Self::default()
        }
    }

    pub fn with_candidates(mut self, signatures: Vec<String>) -> Self {
        self.candidate_signatures = Some(signatures);
        self
    }

    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    pub fn candidates(&self) -> &[String] {
        self.candidate_signatures.as_deref().unwrap_or_default()
    }

    /// Several signatures fit and none has been chosen yet
    pub fn is_ambiguous(&self) -> bool {
        self.candidates().len() > 1 && self.decoded.is_none()
    }

    /// Walk `path` (indices into `params`, descending through `decoded`).
    /// An empty path is this node.
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut DecodedNode> {
        if path.is_empty() {
            return Some(self);
        }
        self.decoded.as_mut()?.node_mut(path)
    }
}

/// A resolved signature (or section title) and its ordered parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedSubtree {
    pub label: String,
    pub params: Vec<DecodedNode>,
}

impl DecodedSubtree {
    pub fn new(label: impl Into<String>, params: Vec<DecodedNode>) -> Self {
        Self {
            label: label.into(),
            params,
        }
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut DecodedNode> {
        let (first, rest) = path.split_first()?;
        self.params.get_mut(*first)?.node_mut(rest)
    }
}
