//! Signed messages
//!
//! A claimant proves control of an address by signing the challenge text.
//! The signed digest is a double SHA-256 over a prefixed, length-framed
//! message, in the style of Bitcoin message signing.

use super::{double_sha256, Hash, KeyError, PrivateKey, RecoverableSignature};
use crate::constants::SIGNED_MESSAGE_PREFIX;

/// Verifies that `signature` signs exactly `message` under `address`.
///
/// Implementations must be pure: the same inputs always give the same answer.
pub trait SignatureVerifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Recovers the signer from a recoverable secp256k1 signature and compares
/// the derived address with the claimed one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageVerifier;

impl SignatureVerifier for MessageVerifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let signature = match RecoverableSignature::from_hex(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        match signature.recover(&message_digest(message)) {
            Ok(public_key) => public_key.to_address() == address,
            Err(_) => false,
        }
    }
}

/// Digest that is actually signed for `message`
pub fn message_digest(message: &str) -> Hash {
    let prefix = SIGNED_MESSAGE_PREFIX.as_bytes();
    let body = message.as_bytes();

    let mut data = Vec::with_capacity(prefix.len() + body.len() + 18);
    write_varint(&mut data, prefix.len() as u64);
    data.extend_from_slice(prefix);
    write_varint(&mut data, body.len() as u64);
    data.extend_from_slice(body);

    double_sha256(&data)
}

/// Sign `message` and return the hex signature a verifier accepts
pub fn sign_message(key: &PrivateKey, message: &str) -> Result<String, KeyError> {
    key.sign_digest(&message_digest(message))
        .map(|sig| sig.to_hex())
}

fn write_varint(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}
