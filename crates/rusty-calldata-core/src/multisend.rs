//! Packed MultiSend batches
//!
//! Neither format is ABI framed, so both are read with a byte cursor.
//!
//! Current (`MultiSendCallOnly` and MultiSend >= 1.1.1), per transaction:
//! `operation`(1) `to`(20) `value`(32) `dataLength`(32) `data`(dataLength)
//!
//! Legacy (MultiSend 1.0.0, `abi.encode` per transaction):
//! `operation`(32) `to`(32) `value`(32) `dataOffset`(32) `dataLength`(32)
//! `data` padded to a 32-byte boundary

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, Bytes, U256};

use crate::error::DecodeError;

const WORD: usize = 32;
const ADDRESS_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackedFormat {
    Current,
    Legacy,
}

impl PackedFormat {
    pub const ALL: [PackedFormat; 2] = [PackedFormat::Current, PackedFormat::Legacy];

    /// Pseudo-signature offered as a candidate for a batch payload
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Multisend",
            Self::Legacy => "Deprecated Multisend",
        }
    }

    /// Title of the decoded batch subtree
    pub fn section_title(self) -> &'static str {
        match self {
            Self::Current => "Multisend transactions",
            Self::Legacy => "Deprecated Multisend transactions",
        }
    }

    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|f| f.label().to_string()).collect()
    }
}

impl fmt::Display for PackedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PackedFormat {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.label() == s)
            .ok_or_else(|| DecodeError::UnknownFormat(s.to_string()))
    }
}

/// One transaction unpacked from a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedTransaction {
    pub operation: U256,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn is_done(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                DecodeError::malformed(format!(
                    "incomplete transaction: '{}' needs {} bytes at offset {}, {} remaining",
                    field,
                    len,
                    self.offset,
                    self.remaining()
                ))
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn word(&mut self, field: &str) -> Result<U256, DecodeError> {
        self.take(WORD, field).map(U256::from_be_slice)
    }

    fn length(&mut self, field: &str) -> Result<usize, DecodeError> {
        let len = self.word(field)?;
        if len > U256::from(usize::MAX) {
            return Err(DecodeError::malformed(format!(
                "'{}' of {} overflows",
                field, len
            )));
        }
        Ok(len.to::<usize>())
    }
}

/// Unpack every transaction in `packed`; the whole input must be consumed
pub fn unpack(format: PackedFormat, packed: &[u8]) -> Result<Vec<PackedTransaction>, DecodeError> {
    let mut cursor = Cursor::new(packed);
    let mut transactions = Vec::new();

    while !cursor.is_done() {
        let tx = match format {
            PackedFormat::Current => read_current(&mut cursor)?,
            PackedFormat::Legacy => read_legacy(&mut cursor)?,
        };
        transactions.push(tx);
    }

    Ok(transactions)
}

fn read_current(cursor: &mut Cursor<'_>) -> Result<PackedTransaction, DecodeError> {
    let operation = U256::from(cursor.take(1, "operation")?[0]);
    let to = Address::from_slice(cursor.take(ADDRESS_LEN, "to")?);
    let value = cursor.word("value")?;
    let data_length = cursor.length("dataLength")?;
    let data = Bytes::copy_from_slice(cursor.take(data_length, "data")?);

    Ok(PackedTransaction {
        operation,
        to,
        value,
        data,
    })
}

fn read_legacy(cursor: &mut Cursor<'_>) -> Result<PackedTransaction, DecodeError> {
    let operation = cursor.word("operation")?;
    // address is right-aligned in its word
    let to = Address::from_slice(&cursor.take(WORD, "to")?[WORD - ADDRESS_LEN..]);
    let value = cursor.word("value")?;
    cursor.take(WORD, "dataOffset")?;
    let data_length = cursor.length("dataLength")?;
    let data = Bytes::copy_from_slice(cursor.take(data_length, "data")?);
    cursor.take(padding_for(data_length), "data padding")?;

    Ok(PackedTransaction {
        operation,
        to,
        value,
        data,
    })
}

/// Bytes needed to reach the next word boundary (zero when aligned)
fn padding_for(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}
