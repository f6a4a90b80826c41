//! Star Registry Core Library
//!
//! An append-only, hash-linked ledger of star ownership claims. Each claim
//! is proven by signing a short-lived challenge with the key behind a
//! wallet address.

pub mod chain;
pub mod crypto;
pub mod node;
pub mod rpc;
pub mod wallet;

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Payload data of the genesis block
    pub const GENESIS_DATA: &str = "Genesis Block";

    /// Seconds a challenge message stays valid after it is issued
    pub const CHALLENGE_WINDOW_SECS: u64 = 300;

    /// How far ahead of the local clock a challenge timestamp may be
    pub const CHALLENGE_MAX_SKEW_SECS: u64 = 60;

    /// Trailing tag of every challenge message
    pub const REGISTRY_TAG: &str = "starRegistry";

    /// Prefix of every wallet address
    pub const ADDRESS_PREFIX: &str = "ST";

    /// Domain separator mixed into every signed message digest
    pub const SIGNED_MESSAGE_PREFIX: &str = "Star Registry Signed Message:\n";

    /// Default HTTP port of the node
    pub const DEFAULT_RPC_PORT: u16 = 8000;
}
