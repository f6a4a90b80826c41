//! Wallet key pairs
//!
//! Claimants hold a key pair, derive their address from it and sign the
//! challenges the registry hands out. Nothing here touches the chain.

use thiserror::Error;

use crate::crypto::{sign_message, KeyError, PrivateKey, PublicKey};

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Signing error: {0}")]
    SigningError(String),
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(#[source] KeyError),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// A wallet key pair
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Private key (for signing)
    private_key: PrivateKey,
    /// Public key
    pub public_key: PublicKey,
    /// Address (derived from public key)
    pub address: String,
}

impl KeyPair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey::generate())
    }

    fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.to_address();

        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// Import from private key bytes
    pub fn from_private_key_bytes(bytes: &[u8; 32]) -> Result<Self, WalletError> {
        PrivateKey::from_bytes(bytes)
            .map(Self::from_private_key)
            .map_err(WalletError::InvalidPrivateKey)
    }

    /// Import from a hex encoded private key
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, WalletError> {
        PrivateKey::from_hex(hex_str)
            .map(Self::from_private_key)
            .map_err(WalletError::InvalidPrivateKey)
    }

    /// Export private key bytes
    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.private_key.to_bytes()
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Sign a registry challenge, returning the hex signature
    pub fn sign_challenge(&self, message: &str) -> Result<String, WalletError> {
        sign_message(&self.private_key, message)
            .map_err(|e| WalletError::SigningError(e.to_string()))
    }
}
