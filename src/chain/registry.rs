//! Star ownership registration
//!
//! A claimant asks for a challenge, signs it with the key behind their
//! address and submits the signature together with the star. A claim is
//! accepted only if the challenge is younger than the window and the
//! signature checks out.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{Block, Blockchain, ChainError, Clock, Rejection};
use crate::constants::{CHALLENGE_MAX_SKEW_SECS, CHALLENGE_WINDOW_SECS, REGISTRY_TAG};
use crate::crypto::SignatureVerifier;

/// Star coordinates and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Declination
    pub dec: String,
    /// Right ascension
    pub ra: String,
    pub story: String,
    #[serde(rename = "mag", default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<String>,
    #[serde(rename = "cen", default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
}

/// Payload of every registration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Star,
}

/// A star together with the address that registered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedStar {
    pub owner: String,
    pub star: Star,
}

/// Build the challenge text for `address` issued at `timestamp`
pub fn challenge_message(address: &str, timestamp: u64) -> String {
    format!("{}:{}:{}", address, timestamp, REGISTRY_TAG)
}

/// Timestamp embedded in a challenge message (second colon-delimited field)
pub fn challenge_timestamp(message: &str) -> Option<u64> {
    message.split(':').nth(1)?.parse().ok()
}

/// Whether a challenge issued at `issued` is still fresh at `now`.
/// Timestamps up to the allowed clock skew ahead count as zero seconds old.
fn is_fresh(issued: u64, now: u64) -> bool {
    if issued > now.saturating_add(CHALLENGE_MAX_SKEW_SECS) {
        return false;
    }
    now.saturating_sub(issued) < CHALLENGE_WINDOW_SECS
}

impl<V: SignatureVerifier, C: Clock> Blockchain<V, C> {
    /// Challenge that the owner of `address` must sign. Nothing is stored.
    pub fn request_ownership_challenge(&self, address: &str) -> String {
        challenge_message(address, self.clock.now())
    }

    /// Register `star` for `address` if the signed challenge is fresh and
    /// authentic. Both checks always run so a rejection reports every
    /// failed check.
    pub fn submit_registration(
        &mut self,
        address: &str,
        message: &str,
        signature: &str,
        star: Star,
    ) -> Result<Block, ChainError> {
        let now = self.clock.now();
        let rejection = Rejection {
            stale_message: !challenge_timestamp(message).is_some_and(|ts| is_fresh(ts, now)),
            bad_signature: !self.verifier.verify(message, address, signature),
        };

        if rejection.is_rejected() {
            warn!(address, %rejection, "registration rejected");
            return Err(ChainError::RegistrationRejected(rejection));
        }

        let payload = RegistrationPayload {
            address: address.to_string(),
            message: message.to_string(),
            signature: signature.to_string(),
            star,
        };
        let block = self.append_payload(&payload)?;

        info!(address, height = block.height, "star registered");
        Ok(block.clone())
    }

    /// Lazily walk the chain for stars registered by `address`, in chain
    /// order. Genesis is skipped. A payload that fails to decode yields
    /// `CorruptChainData` and ends the walk.
    pub fn stars_owned_by<'a>(&'a self, address: &'a str) -> StarsOwnedBy<'a> {
        StarsOwnedBy {
            blocks: self.blocks.get(1..).unwrap_or(&[]).iter(),
            address,
            failed: false,
        }
    }

    /// All stars registered by `address`, failing as a whole on corruption
    pub fn collect_stars_owned_by(&self, address: &str) -> Result<Vec<OwnedStar>, ChainError> {
        self.stars_owned_by(address).collect()
    }
}

/// Iterator returned by [`Blockchain::stars_owned_by`]. Clone it to restart.
#[derive(Debug, Clone)]
pub struct StarsOwnedBy<'a> {
    blocks: std::slice::Iter<'a, Block>,
    address: &'a str,
    failed: bool,
}

impl<'a> Iterator for StarsOwnedBy<'a> {
    type Item = Result<OwnedStar, ChainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for block in self.blocks.by_ref() {
            match block.decode_payload::<RegistrationPayload>() {
                Ok(payload) if payload.address == self.address => {
                    return Some(Ok(OwnedStar {
                        owner: payload.address,
                        star: payload.star,
                    }));
                }
                Ok(_) => continue,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(ChainError::CorruptChainData {
                        height: block.height,
                        source,
                    }));
                }
            }
        }
        None
    }
}
