//! Chain and block errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised by a single block
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("Failed to encode block content: {0}")]
    Encoding(#[source] serde_json::Error),
    #[error("Block payload is corrupt: {0}")]
    CorruptPayload(String),
    #[error("Genesis block payload is not available")]
    GenesisPayloadUnavailable,
}

/// Errors raised by chain operations
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Failed to append block: {0}")]
    AppendFailure(#[source] BlockError),
    #[error("Registration rejected: {0}")]
    RegistrationRejected(Rejection),
    #[error("Block not found: {0}")]
    NotFound(String),
    #[error("Corrupt chain data at height {height}: {source}")]
    CorruptChainData {
        height: u64,
        #[source]
        source: BlockError,
    },
    #[error(transparent)]
    Block(#[from] BlockError),
}

/// Which registration checks failed. At least one flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// The challenge timestamp is outside the window or unreadable
    pub stale_message: bool,
    /// The signature does not sign the message under the address
    pub bad_signature: bool,
}

impl Rejection {
    pub fn is_rejected(&self) -> bool {
        self.stale_message || self.bad_signature
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.stale_message, self.bad_signature) {
            (true, true) => write!(f, "stale message and bad signature"),
            (true, false) => write!(f, "stale message"),
            (false, true) => write!(f, "bad signature"),
            (false, false) => write!(f, "no failed checks"),
        }
    }
}
