//! ABI argument decoding
//!
//! Signature text is parsed with `alloy_json_abi::Function::parse()` and the
//! arguments decoded with `alloy_dyn_abi`, the same pattern Foundry's
//! `abi_decode_calldata` follows.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{hex, Selector};
use tracing::debug;

use crate::error::DecodeError;

pub fn parse_signature(signature: &str) -> Result<Function, DecodeError> {
    Function::parse(signature).map_err(|e| DecodeError::InvalidSignature {
        signature: signature.to_string(),
        reason: e.to_string(),
    })
}

/// 4-byte selector of a function signature
///
/// Signatures that differ textually but hash to the same selector are
/// indistinguishable here.
pub fn selector_of(signature: &str) -> Result<Selector, DecodeError> {
    parse_signature(signature).map(|f| f.selector())
}

/// Decode `calldata` (selector included) into one value per declared input
pub fn decode_arguments(
    function: &Function,
    calldata: &[u8],
) -> Result<Vec<DynSolValue>, DecodeError> {
    if calldata.len() < 4 {
        return Err(DecodeError::malformed(
            "data too short (need at least 4 bytes for selector)",
        ));
    }

    let expected = function.selector();
    if calldata[..4] != expected[..] {
        return Err(DecodeError::malformed(format!(
            "selector mismatch: got 0x{}, expected {}",
            hex::encode(&calldata[..4]),
            expected
        )));
    }

    if calldata.len() == 4 && function.inputs.is_empty() {
        return Ok(vec![]);
    }

    debug!(
        function = %function.name,
        inputs = function.inputs.len(),
        "abi decoding arguments"
    );

    function
        .abi_decode_input(&calldata[4..], true)
        .map_err(|e| {
            DecodeError::malformed(format!(
                "ABI decode failed for '{}': {e}",
                function.signature()
            ))
        })
}
