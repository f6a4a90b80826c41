//! Async registry service
//!
//! Wraps a single [`Blockchain`] behind one async mutex. Each call holds the
//! lock for its whole duration, so appends and validations never interleave.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chain::{Block, Blockchain, ChainError, ChainReport, Clock, OwnedStar, Star, SystemClock};
use crate::crypto::{MessageVerifier, SignatureVerifier};

/// Shared handle to the node's chain
pub struct StarRegistry<V = MessageVerifier, C = SystemClock> {
    chain: Arc<Mutex<Blockchain<V, C>>>,
}

impl<V, C> Clone for StarRegistry<V, C> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl StarRegistry {
    /// Registry backed by the bundled verifier and wall-clock time
    pub fn with_defaults() -> Result<Self, ChainError> {
        Ok(Self::new(Blockchain::with_defaults()?))
    }
}

impl<V: SignatureVerifier, C: Clock> StarRegistry<V, C> {
    pub fn new(chain: Blockchain<V, C>) -> Self {
        Self {
            chain: Arc::new(Mutex::new(chain)),
        }
    }

    pub async fn height(&self) -> i64 {
        self.chain.lock().await.height()
    }

    pub async fn request_ownership_challenge(&self, address: &str) -> String {
        self.chain.lock().await.request_ownership_challenge(address)
    }

    pub async fn submit_registration(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block, ChainError> {
        self.chain
            .lock()
            .await
            .submit_registration(address, message, signature, star)
    }

    pub async fn find_by_hash(&self, hash: &str) -> Result<Block, ChainError> {
        self.chain.lock().await.find_by_hash(hash).cloned()
    }

    pub async fn find_by_height(&self, height: u64) -> Option<Block> {
        self.chain.lock().await.find_by_height(height).cloned()
    }

    pub async fn stars_owned_by(&self, address: &str) -> Result<Vec<OwnedStar>, ChainError> {
        self.chain.lock().await.collect_stars_owned_by(address)
    }

    pub async fn validate_chain(&self) -> Result<ChainReport, ChainError> {
        self.chain.lock().await.validate_chain()
    }
}
