//! Selector dispatch over decoded top-level arguments
//!
//! A small static table maps `(selector, argument count)` to a [`CallKind`].
//! Anything not in the table is [`CallKind::Generic`].

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{FixedBytes, Selector};

use crate::error::DecodeError;
use crate::multisend::PackedFormat;
use crate::types::{DecodedNode, DecodedSubtree, RawValue};

/// `multiSend(bytes)`
pub const MULTISEND_SELECTOR: Selector = FixedBytes([0x8d, 0x80, 0xff, 0x0a]);

/// `execTransaction(address,uint256,bytes,uint8,uint256,uint256,uint256,address,address,bytes)`
pub const EXEC_TRANSACTION_SELECTOR: Selector = FixedBytes([0x6a, 0x76, 0x12, 0x02]);

pub const SAFE_TRANSACTION_LABEL: &str = "Safe transaction";

/// Field labels of a Safe transaction, in argument order
pub const SAFE_TRANSACTION_FIELDS: [&str; 10] = [
    "To",
    "Value",
    "Data",
    "Operation",
    "SafeTxGas",
    "BaseGas",
    "GasPrice",
    "GasToken",
    "RefundReceiver",
    "Signatures",
];

/// Position of `Data` within [`SAFE_TRANSACTION_FIELDS`]
pub const SAFE_DATA_INDEX: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Arguments become bare leaves
    Generic,
    /// Single `bytes` argument holding a packed batch
    BatchEncoded,
    /// Safe meta-transaction with ten fixed fields
    MetaTransaction,
}

struct DispatchEntry {
    selector: Selector,
    arity: usize,
    kind: CallKind,
}

const DISPATCH_TABLE: &[DispatchEntry] = &[
    DispatchEntry {
        selector: MULTISEND_SELECTOR,
        arity: 1,
        kind: CallKind::BatchEncoded,
    },
    DispatchEntry {
        selector: EXEC_TRANSACTION_SELECTOR,
        arity: SAFE_TRANSACTION_FIELDS.len(),
        kind: CallKind::MetaTransaction,
    },
];

pub fn classify(selector: Selector, arg_count: usize) -> CallKind {
    DISPATCH_TABLE
        .iter()
        .find(|entry| entry.selector == selector && entry.arity == arg_count)
        .map_or(CallKind::Generic, |entry| entry.kind)
}

/// Unlabeled leaf per argument
pub fn generic_leaves(args: &[DynSolValue]) -> Vec<DecodedNode> {
    args.iter()
        .cloned()
        .map(|arg| DecodedNode::leaf(arg.into()))
        .collect()
}

/// Undecoded batch payload; the caller picks which packed format applies
pub fn multisend_stub(args: &[DynSolValue]) -> Result<DecodedNode, DecodeError> {
    match args {
        [DynSolValue::Bytes(data)] => Ok(DecodedNode::leaf(RawValue::Bytes(data.clone().into()))
            .with_candidates(PackedFormat::labels())
            .collapsible()),
        _ => Err(DecodeError::malformed(
            "multiSend expects a single bytes argument",
        )),
    }
}

/// Labeled Safe transaction subtree. `Data` is left without candidates.
pub fn safe_transaction(args: &[DynSolValue]) -> Result<DecodedNode, DecodeError> {
    if args.len() != SAFE_TRANSACTION_FIELDS.len() {
        return Err(DecodeError::malformed(format!(
            "Safe transaction expects {} arguments, got {}",
            SAFE_TRANSACTION_FIELDS.len(),
            args.len()
        )));
    }
    if !matches!(args[SAFE_DATA_INDEX], DynSolValue::Bytes(_)) {
        return Err(DecodeError::malformed("Safe transaction data is not bytes"));
    }

    let params = SAFE_TRANSACTION_FIELDS
        .iter()
        .zip(args.iter().cloned())
        .enumerate()
        .map(|(idx, (label, arg))| {
            let node = DecodedNode::labeled(*label, arg.into());
            if idx == SAFE_DATA_INDEX {
                node.collapsible()
            } else {
                node
            }
        })
        .collect();

    Ok(DecodedNode::structural(DecodedSubtree::new(
        SAFE_TRANSACTION_LABEL,
        params,
    )))
}
