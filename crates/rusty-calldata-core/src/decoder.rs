//! Decode orchestration
//!
//! Every decode call builds a fresh tree. Values that carry exactly one
//! candidate signature are decoded eagerly; values with several stay
//! undecoded until [`Decoder::select_signature`] is called for them.

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::Function;
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::abi;
use crate::blob;
use crate::error::DecodeError;
use crate::multisend::{self, PackedFormat};
use crate::ports::{candidate_signatures, SignatureResolver};
use crate::postprocess::{self, CallKind, SAFE_DATA_INDEX};
use crate::types::{DecodedNode, DecodedSubtree, RawValue};

pub struct Decoder<R> {
    resolver: R,
}

impl<R: SignatureResolver> Decoder<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Decode `blob` under `signature`.
    ///
    /// `signature` is either a function signature or one of the packed
    /// batch labels (`Multisend`, `Deprecated Multisend`). A blob that does
    /// not fit the signature fails as a whole.
    pub fn decode<'a>(
        &'a self,
        signature: &'a str,
        blob: &'a str,
    ) -> BoxFuture<'a, Result<DecodedSubtree, DecodeError>> {
        async move {
            if let Ok(format) = signature.parse::<PackedFormat>() {
                return self.decode_batch(format, blob).await;
            }

            debug!(signature, "decoding calldata");
            let function = abi::parse_signature(signature)?;
            let calldata = blob::parse_hex(blob)?;
            let args = abi::decode_arguments(&function, &calldata)?;
            let params = self.post_process(&function, args).await;

            Ok(DecodedSubtree::new(signature, params))
        }
        .boxed()
    }

    /// Decode a packed batch by its format label
    pub async fn decode_packed(
        &self,
        label: &str,
        blob: &str,
    ) -> Result<DecodedSubtree, DecodeError> {
        let format = label.parse::<PackedFormat>()?;
        self.decode_batch(format, blob).await
    }

    /// Look up candidates for `blob` and decode right away if exactly one fits.
    ///
    /// Lookup failures and a failed eager decode leave `decoded` absent.
    pub async fn resolve_and_decode(&self, blob: &str) -> Result<DecodedNode, DecodeError> {
        let value = blob::parse_hex(blob)?;
        let mut node = DecodedNode::leaf(RawValue::Bytes(value)).collapsible();
        self.attach_candidates(&mut node).await;
        Ok(node)
    }

    /// Decode `node`'s value under one of its candidate signatures.
    ///
    /// Any previous decode of the node is discarded, never merged. On
    /// failure the node is left without a decode.
    pub async fn select_signature(
        &self,
        node: &mut DecodedNode,
        signature: &str,
    ) -> Result<(), DecodeError> {
        if !node.candidates().iter().any(|c| c == signature) {
            return Err(DecodeError::SignatureNotCandidate(signature.to_string()));
        }
        let blob = node
            .value
            .as_ref()
            .and_then(RawValue::as_bytes)
            .map(|b| blob::to_hex(b))
            .ok_or_else(|| DecodeError::malformed("node carries no byte value to decode"))?;

        node.decoded = None;
        node.decoded = Some(self.decode(signature, &blob).await?);
        Ok(())
    }

    async fn decode_batch(
        &self,
        format: PackedFormat,
        blob: &str,
    ) -> Result<DecodedSubtree, DecodeError> {
        let packed = blob::parse_hex(blob)?;
        let transactions = multisend::unpack(format, &packed)?;
        debug!(%format, count = transactions.len(), "unpacked batch");

        // one record at a time so lookups resolve in batch order
        let mut params = Vec::with_capacity(transactions.len());
        for (index, tx) in transactions.into_iter().enumerate() {
            let mut data = DecodedNode::labeled("Data", RawValue::Bytes(tx.data)).collapsible();
            self.attach_candidates(&mut data).await;

            params.push(DecodedNode::structural(DecodedSubtree::new(
                format!("Transaction {}", index + 1),
                vec![
                    DecodedNode::labeled("Operation", RawValue::Uint(tx.operation)),
                    DecodedNode::labeled("To", RawValue::Text(blob::to_hex(tx.to.as_slice()))),
                    DecodedNode::labeled("Value", RawValue::Text(blob::to_hex_quantity(tx.value))),
                    data,
                ],
            )));
        }

        Ok(DecodedSubtree::new(format.section_title(), params))
    }

    async fn post_process(&self, function: &Function, args: Vec<DynSolValue>) -> Vec<DecodedNode> {
        let kind = postprocess::classify(function.selector(), args.len());
        let special = match kind {
            CallKind::Generic => None,
            CallKind::BatchEncoded => Some(postprocess::multisend_stub(&args)),
            CallKind::MetaTransaction => Some(self.safe_transaction(&args).await),
        };

        match special {
            Some(Ok(node)) => vec![node],
            Some(Err(e)) => {
                warn!(?kind, error = %e, "falling back to generic arguments");
                postprocess::generic_leaves(&args)
            }
            None => postprocess::generic_leaves(&args),
        }
    }

    async fn safe_transaction(&self, args: &[DynSolValue]) -> Result<DecodedNode, DecodeError> {
        let mut node = postprocess::safe_transaction(args)?;
        let data = node
            .decoded
            .as_mut()
            .and_then(|d| d.params.get_mut(SAFE_DATA_INDEX))
            .ok_or_else(|| DecodeError::malformed("Safe transaction has no data field"))?;
        self.attach_candidates(data).await;
        Ok(node)
    }

    /// Fill in candidates for a byte-valued node, decoding eagerly when
    /// there is exactly one
    async fn attach_candidates(&self, node: &mut DecodedNode) {
        let Some(blob) = node.value.as_ref().and_then(RawValue::as_bytes).map(|b| blob::to_hex(b))
        else {
            return;
        };

        let signatures = candidate_signatures(&self.resolver, &blob).await;
        node.decoded = None;
        if let [signature] = signatures.as_slice() {
            match self.decode(signature, &blob).await {
                Ok(decoded) => node.decoded = Some(decoded),
                Err(e) => warn!(signature = %signature, error = %e, "eager decode failed"),
            }
        }
        node.candidate_signatures = Some(signatures);
    }
}
