//! Block structure for the star registry
//!
//! A block carries an opaque hex-of-JSON payload plus the linkage metadata
//! assigned when it is appended to the chain.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::BlockError;
use crate::crypto::sha256_hex;

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// SHA-256 of the canonical content, `None` until appended
    pub hash: Option<String>,
    /// Position in the chain
    pub height: u64,
    /// Hex encoded JSON payload
    pub body: String,
    /// Append time (seconds since Unix epoch)
    pub time: u64,
    /// Hash of the block at `height - 1`, `None` for genesis
    pub previous_block_hash: Option<String>,
}

/// Fields covered by the digest, in canonical order
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DigestView<'a> {
    height: u64,
    body: &'a str,
    time: u64,
    previous_block_hash: Option<&'a str>,
}

impl Block {
    /// Create an unappended block wrapping `payload`
    pub fn new<T: Serialize + ?Sized>(payload: &T) -> Result<Self, BlockError> {
        let json = serde_json::to_vec(payload).map_err(BlockError::Encoding)?;
        Ok(Self {
            hash: None,
            height: 0,
            body: hex::encode(json),
            time: 0,
            previous_block_hash: None,
        })
    }

    /// Digest over `{height, body, time, previousBlockHash}`. The stored
    /// hash never participates.
    pub fn compute_digest(&self) -> Result<String, BlockError> {
        let view = DigestView {
            height: self.height,
            body: &self.body,
            time: self.time,
            previous_block_hash: self.previous_block_hash.as_deref(),
        };
        let bytes = serde_json::to_vec(&view).map_err(BlockError::Encoding)?;
        Ok(sha256_hex(&bytes))
    }

    /// Returns `Ok(false)` if the content no longer matches the stored hash
    pub fn validate(&self) -> Result<bool, BlockError> {
        let Some(stored) = self.hash.as_deref() else {
            return Ok(false);
        };
        Ok(self.compute_digest()? == stored)
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the payload into `T`. The genesis payload is never exposed.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T, BlockError> {
        if self.is_genesis() {
            return Err(BlockError::GenesisPayloadUnavailable);
        }
        self.decode_body()
    }

    /// Decode the payload as untyped JSON
    pub fn decode_raw(&self) -> Result<serde_json::Value, BlockError> {
        self.decode_payload()
    }

    fn decode_body<T: DeserializeOwned>(&self) -> Result<T, BlockError> {
        let bytes = hex::decode(&self.body)
            .map_err(|e| BlockError::CorruptPayload(format!("body is not hex: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BlockError::CorruptPayload(format!("body is not valid JSON: {}", e)))
    }

    /// Decode regardless of height. Used to check the genesis content.
    pub(crate) fn decode_body_unchecked(&self) -> Result<serde_json::Value, BlockError> {
        self.decode_body()
    }
}
