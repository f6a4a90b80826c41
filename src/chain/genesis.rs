//! Genesis block
//!
//! The first block carries a fixed payload and no predecessor. Its height
//! and append time are assigned by the chain like any other block.

use serde::{Deserialize, Serialize};

use super::{Block, BlockError};
use crate::constants::GENESIS_DATA;

/// Payload of the genesis block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPayload {
    pub data: String,
}

impl Default for GenesisPayload {
    fn default() -> Self {
        Self { data: GENESIS_DATA.to_string() }
    }
}

/// Create the unappended genesis block
pub fn create_genesis_block() -> Result<Block, BlockError> {
    Block::new(&GenesisPayload::default())
}

/// Whether `block` has the genesis shape: height 0, no predecessor and the
/// fixed payload.
pub fn is_canonical_genesis(block: &Block) -> bool {
    if block.height != 0 || block.previous_block_hash.is_some() {
        return false;
    }
    match block.decode_body_unchecked() {
        Ok(value) => value == serde_json::json!({ "data": GENESIS_DATA }),
        Err(_) => false,
    }
}
