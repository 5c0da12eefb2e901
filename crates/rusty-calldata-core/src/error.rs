use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Registry unreachable, bad response, or no selector to query.
    #[error("signature lookup failed: {0}")]
    Lookup(String),
    /// ABI mismatch, or a structural violation in a packed batch.
    #[error("malformed calldata: {0}")]
    MalformedCalldata(String),
    #[error("unknown packed format '{0}'")]
    UnknownFormat(String),
    #[error("invalid function signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },
    #[error("'{0}' is not a candidate signature for this value")]
    SignatureNotCandidate(String),
}

impl DecodeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedCalldata(msg.into())
    }
}
