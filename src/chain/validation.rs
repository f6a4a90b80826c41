//! Chain validation
//!
//! Recomputes every digest and every link from scratch. Findings are data in
//! the report; only a failure to compute a digest is returned as an error.

use serde::Serialize;
use tracing::{info, warn};

use super::{is_canonical_genesis, Blockchain, ChainError, Clock};
use crate::crypto::SignatureVerifier;

/// A problem found at one height
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Finding {
    /// Stored hash does not match the block content
    ContentTampered,
    /// Stored previous hash does not match the predecessor's hash
    LinkageBroken {
        expected: Option<String>,
        found: Option<String>,
    },
    /// Height 0 does not hold the fixed genesis block
    GenesisMismatch,
}

/// Findings for a single height. Empty for a clean block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    pub height: u64,
    pub findings: Vec<Finding>,
}

impl BlockReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// One entry per height, in height order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    pub is_valid: bool,
    pub blocks: Vec<BlockReport>,
}

impl ChainReport {
    /// Reports that carry at least one finding
    pub fn errors(&self) -> impl Iterator<Item = &BlockReport> {
        self.blocks.iter().filter(|b| !b.is_clean())
    }
}

impl<V: SignatureVerifier, C: Clock> Blockchain<V, C> {
    /// Validate every block's content and every link to its predecessor
    pub fn validate_chain(&self) -> Result<ChainReport, ChainError> {
        let mut is_valid = true;
        let mut reports = Vec::with_capacity(self.blocks.len());

        for (i, block) in self.blocks.iter().enumerate() {
            let mut findings = Vec::new();

            if !block.validate()? {
                findings.push(Finding::ContentTampered);
            }

            if i == 0 {
                if !is_canonical_genesis(block) {
                    findings.push(Finding::GenesisMismatch);
                }
            } else {
                let prev = &self.blocks[i - 1];
                if block.previous_block_hash != prev.hash {
                    findings.push(Finding::LinkageBroken {
                        expected: prev.hash.clone(),
                        found: block.previous_block_hash.clone(),
                    });
                }
            }

            if !findings.is_empty() {
                is_valid = false;
                warn!(height = i, ?findings, "block failed validation");
            }
            reports.push(BlockReport {
                height: i as u64,
                findings,
            });
        }

        info!(is_valid, blocks = reports.len(), "chain validated");
        Ok(ChainReport {
            is_valid,
            blocks: reports,
        })
    }
}
