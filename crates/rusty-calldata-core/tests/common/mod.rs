#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{hex, Address, U256};
use async_trait::async_trait;

use rusty_calldata_core::{DecodeError, SignatureResolver};

pub const TRANSFER: &str = "transfer(address,uint256)";
pub const MULTISEND: &str = "multiSend(bytes)";
pub const EXEC_TRANSACTION: &str =
    "execTransaction(address,uint256,bytes,uint8,uint256,uint256,uint256,address,address,bytes)";

/// Fixed selector table that records every lookup
#[derive(Debug, Default)]
pub struct StubResolver {
    signatures: HashMap<String, Vec<String>>,
    failing: bool,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Register signatures under the selector of the first one
    pub fn with(mut self, signatures: &[&str]) -> Self {
        let selector = rusty_calldata_core::selector_of(signatures[0])
            .expect("valid signature")
            .to_string();
        self.signatures
            .insert(selector, signatures.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Register signatures under an explicit selector
    pub fn with_selector(mut self, selector: &str, signatures: &[&str]) -> Self {
        self.signatures.insert(
            selector.to_string(),
            signatures.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignatureResolver for StubResolver {
    async fn lookup(&self, selector: &str) -> Result<Vec<String>, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().expect("seen lock").push(selector.to_string());
        if self.failing {
            return Err(DecodeError::Lookup("registry unreachable".into()));
        }
        Ok(self.signatures.get(selector).cloned().unwrap_or_default())
    }
}

pub fn encode_call(signature: &str, args: &[DynSolValue]) -> Vec<u8> {
    Function::parse(signature)
        .expect("valid signature")
        .abi_encode_input(args)
        .expect("encodable args")
}

pub fn hex_of(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn transfer_call(to: Address, amount: u64) -> Vec<u8> {
    encode_call(
        TRANSFER,
        &[
            DynSolValue::Address(to),
            DynSolValue::Uint(U256::from(amount), 256),
        ],
    )
}

pub fn multisend_call(packed: Vec<u8>) -> Vec<u8> {
    encode_call(MULTISEND, &[DynSolValue::Bytes(packed)])
}

pub fn exec_transaction_call(to: Address, value: u64, data: Vec<u8>) -> Vec<u8> {
    encode_call(
        EXEC_TRANSACTION,
        &[
            DynSolValue::Address(to),
            DynSolValue::Uint(U256::from(value), 256),
            DynSolValue::Bytes(data),
            DynSolValue::Uint(U256::ZERO, 8),
            DynSolValue::Uint(U256::from(50_000), 256),
            DynSolValue::Uint(U256::ZERO, 256),
            DynSolValue::Uint(U256::ZERO, 256),
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Bytes(vec![0x1b; 65]),
        ],
    )
}

/// One record in the current packed layout
pub fn packed_record(operation: u8, to: Address, value: U256, data: &[u8]) -> Vec<u8> {
    let mut out = vec![operation];
    out.extend_from_slice(to.as_slice());
    out.extend_from_slice(&value.to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    out.extend_from_slice(data);
    out
}

/// One record in the legacy `abi.encode` layout
pub fn legacy_record(operation: u8, to: Address, value: U256, data: &[u8]) -> Vec<u8> {
    let mut out = U256::from(operation).to_be_bytes::<32>().to_vec();
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(to.as_slice());
    out.extend_from_slice(&value.to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(0x80).to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    out.extend_from_slice(data);
    let padding = (32 - data.len() % 32) % 32;
    out.resize(out.len() + padding, 0);
    out
}

pub fn recipient() -> Address {
    "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        .parse()
        .expect("valid recipient")
}
