//! secp256k1 keys and recoverable signatures
//!
//! Claimants sign challenge messages with recoverable ECDSA so that a
//! verifier holding only an address can recover the signing key.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use thiserror::Error;

use super::Hash;
use crate::constants::ADDRESS_PREFIX;

/// Key and signature errors
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
    #[error("Public key recovery failed")]
    RecoveryFailed,
}

/// 32-byte private key
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

/// 33-byte compressed SEC1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(pub [u8; 33]);

/// 65-byte recoverable signature: `r || s || recovery_id`
#[derive(Clone, PartialEq, Eq)]
pub struct RecoverableSignature(pub [u8; 65]);

impl PrivateKey {
    /// Generate a new random private key
    pub fn generate() -> Self {
        PrivateKey(SigningKey::random(&mut OsRng))
    }

    /// Create from 32 bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        SigningKey::from_slice(bytes)
            .map(PrivateKey)
            .map_err(|_| KeyError::InvalidPrivateKey)
    }

    /// Parse a hex encoded private key
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim())?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Self::from_bytes(&arr)
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.0.verifying_key())
    }

    /// Sign a 32-byte digest
    pub fn sign_digest(&self, digest: &Hash) -> Result<RecoverableSignature, KeyError> {
        let (signature, recovery_id) = self
            .0
            .sign_prehash_recoverable(&digest.0)
            .map_err(|e| KeyError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(signature.to_bytes().as_slice());
        bytes[64] = recovery_id.to_byte();
        Ok(RecoverableSignature(bytes))
    }

    /// Export to bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }
}

impl PublicKey {
    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.as_affine().to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        PublicKey(bytes)
    }

    /// Convert to address with checksum
    pub fn to_address(&self) -> String {
        // Address = "ST" + Base58(BLAKE3(pubkey)[0:20] + checksum[0:4])
        let hash = super::hash_bytes(&self.0);
        let addr_bytes = &hash.0[0..20];

        let checksum = super::double_hash(addr_bytes);

        let mut with_checksum = Vec::with_capacity(24);
        with_checksum.extend_from_slice(addr_bytes);
        with_checksum.extend_from_slice(&checksum.0[0..4]);

        format!("{}{}", ADDRESS_PREFIX, bs58::encode(&with_checksum).into_string())
    }
}

impl RecoverableSignature {
    /// Parse a hex encoded 65-byte signature
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim())?;
        let arr: [u8; 65] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSignature)?;
        Ok(RecoverableSignature(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Recover the public key that produced this signature over `digest`
    pub fn recover(&self, digest: &Hash) -> Result<PublicKey, KeyError> {
        let signature =
            Signature::from_slice(&self.0[..64]).map_err(|_| KeyError::InvalidSignature)?;
        let recovery_id = RecoveryId::from_byte(self.0[64]).ok_or(KeyError::InvalidSignature)?;

        let key = VerifyingKey::recover_from_prehash(&digest.0, &signature, recovery_id)
            .map_err(|_| KeyError::RecoveryFailed)?;
        Ok(PublicKey::from_verifying_key(&key))
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl std::fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::sha256;

    #[test]
    fn test_key_generation() {
        let private = PrivateKey::generate();
        let public = private.public_key();
        assert!(public.0[0] == 0x02 || public.0[0] == 0x03);
    }

    #[test]
    fn test_sign_recover() {
        let private = PrivateKey::generate();
        let digest = sha256(b"test message");
        let signature = private.sign_digest(&digest).unwrap();

        let recovered = signature.recover(&digest).unwrap();
        assert_eq!(recovered, private.public_key());
    }

    #[test]
    fn test_wrong_message_recovers_other_key() {
        let private = PrivateKey::generate();
        let signature = private.sign_digest(&sha256(b"message 1")).unwrap();

        match signature.recover(&sha256(b"message 2")) {
            Ok(key) => assert_ne!(key, private.public_key()),
            Err(_) => {}
        }
    }

    #[test]
    fn test_address_generation() {
        let address = PrivateKey::generate().public_key().to_address();
        assert!(address.starts_with(ADDRESS_PREFIX));
        assert!(address.len() > 10);
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let private = PrivateKey::generate();
        let recovered = PrivateKey::from_hex(&hex::encode(private.to_bytes())).unwrap();
        assert_eq!(private.public_key(), recovered.public_key());
    }

    #[test]
    fn test_signature_hex_rejects_bad_length() {
        assert!(matches!(
            RecoverableSignature::from_hex("abcd"),
            Err(KeyError::InvalidSignature)
        ));
        assert!(matches!(
            RecoverableSignature::from_hex("zz"),
            Err(KeyError::InvalidHex(_))
        ));
    }
}
