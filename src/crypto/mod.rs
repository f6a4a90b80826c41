//! Cryptography module - hashing, secp256k1 keys, signed messages

mod hash;
mod keys;
mod message;

pub use hash::*;
pub use keys::*;
pub use message::*;
