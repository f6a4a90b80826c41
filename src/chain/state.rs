//! Chain state management
//!
//! Owns the ordered block vector and is the only place blocks get appended.
//! Every mutating call takes `&mut self`, so a chain has exactly one writer.

use serde::Serialize;
use tracing::{debug, info};

use super::{Block, ChainError, Clock, GenesisPayload, SystemClock};
use crate::crypto::{MessageVerifier, SignatureVerifier};

/// The in-memory ledger
pub struct Blockchain<V = MessageVerifier, C = SystemClock> {
    pub(super) blocks: Vec<Block>,
    pub(super) verifier: V,
    pub(super) clock: C,
}

impl Blockchain {
    /// Chain using the bundled signature verifier and wall-clock time
    pub fn with_defaults() -> Result<Self, ChainError> {
        Self::new(MessageVerifier, SystemClock)
    }
}

impl<V: SignatureVerifier, C: Clock> Blockchain<V, C> {
    /// Create a chain with its genesis block already appended
    pub fn new(verifier: V, clock: C) -> Result<Self, ChainError> {
        let mut chain = Self {
            blocks: Vec::new(),
            verifier,
            clock,
        };
        chain.initialize()?;
        Ok(chain)
    }

    /// Append the genesis block if the chain is empty. No-op otherwise.
    pub fn initialize(&mut self) -> Result<(), ChainError> {
        if !self.blocks.is_empty() {
            return Ok(());
        }
        let genesis = self.append_payload(&GenesisPayload::default())?;
        info!(hash = ?genesis.hash, "genesis block created");
        Ok(())
    }

    /// Index of the last block, `-1` when empty
    pub fn height(&self) -> i64 {
        self.blocks.len() as i64 - 1
    }

    /// All blocks in height order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Wrap `payload` in a new block and append it. Encoding failures
    /// surface as `AppendFailure` with the chain unchanged.
    pub(super) fn append_payload<T: Serialize + ?Sized>(
        &mut self,
        payload: &T,
    ) -> Result<&Block, ChainError> {
        let block = Block::new(payload).map_err(ChainError::AppendFailure)?;
        self.append(block)
    }

    /// Link `block` to the tip, hash it and push it.
    ///
    /// The block is fully assembled before the push, so a failure leaves the
    /// chain unchanged.
    fn append(&mut self, mut block: Block) -> Result<&Block, ChainError> {
        block.height = self.blocks.len() as u64;
        block.time = self.clock.now();
        block.previous_block_hash = self.blocks.last().and_then(|tip| tip.hash.clone());
        block.hash = Some(block.compute_digest().map_err(ChainError::AppendFailure)?);

        debug!(height = block.height, hash = ?block.hash, "block appended");
        self.blocks.push(block);
        let idx = self.blocks.len() - 1;
        Ok(&self.blocks[idx])
    }

    /// Exact, case-sensitive hash lookup
    pub fn find_by_hash(&self, hash: &str) -> Result<&Block, ChainError> {
        self.blocks
            .iter()
            .find(|b| b.hash.as_deref() == Some(hash))
            .ok_or_else(|| ChainError::NotFound(hash.to_string()))
    }

    /// Block at `height`, `None` if out of range
    pub fn find_by_height(&self, height: u64) -> Option<&Block> {
        usize::try_from(height).ok().and_then(|h| self.blocks.get(h))
    }
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::chain::{is_canonical_genesis, BlockError, ManualClock};
    use serde_json::json;

    /// Verifier that accepts everything
    pub struct AcceptAll;

    impl SignatureVerifier for AcceptAll {
        fn verify(&self, _message: &str, _address: &str, _signature: &str) -> bool {
            true
        }
    }

    pub fn test_chain(start: u64) -> (Blockchain<AcceptAll, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start);
        let chain = Blockchain::new(AcceptAll, clock.clone()).unwrap();
        (chain, clock)
    }

    #[test]
    fn test_fresh_chain_has_genesis() {
        let (chain, _) = test_chain(1_000);

        assert_eq!(chain.height(), 0);
        let genesis = chain.find_by_height(0).unwrap();
        assert_eq!(genesis.previous_block_hash, None);
        assert_eq!(genesis.time, 1_000);
        assert!(is_canonical_genesis(genesis));
        assert!(matches!(
            genesis.decode_raw(),
            Err(BlockError::GenesisPayloadUnavailable)
        ));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (mut chain, _) = test_chain(1_000);
        let genesis_hash = chain.blocks()[0].hash.clone();

        chain.initialize().unwrap();
        chain.initialize().unwrap();

        assert_eq!(chain.blocks().len(), 1);
        assert_eq!(chain.blocks()[0].hash, genesis_hash);
    }

    #[test]
    fn test_append_links_to_tip() {
        let (mut chain, clock) = test_chain(1_000);
        clock.advance(10);

        let block = Block::new(&json!({ "n": 1 })).unwrap();
        let appended = chain.append(block).unwrap().clone();

        assert_eq!(appended.height, 1);
        assert_eq!(appended.time, 1_010);
        assert_eq!(appended.previous_block_hash, chain.blocks()[0].hash);
        assert!(appended.validate().unwrap());
        assert_eq!(chain.height(), 1);
    }

    #[test]
    fn test_heights_match_positions() {
        let (mut chain, _) = test_chain(1_000);
        for n in 0..5 {
            chain.append(Block::new(&json!({ "n": n })).unwrap()).unwrap();
        }
        for (i, block) in chain.blocks().iter().enumerate() {
            assert_eq!(block.height, i as u64);
        }
        assert_eq!(chain.height(), 5);
    }

    /// Payload whose encoding always fails
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("payload refuses to encode"))
        }
    }

    #[test]
    fn test_failed_append_leaves_chain_unchanged() {
        let (mut chain, clock) = test_chain(1_000);
        chain.append_payload(&json!({ "n": 1 })).unwrap();
        let before = chain.blocks().to_vec();

        clock.advance(5);
        let result = chain.append_payload(&Unencodable);
        assert!(matches!(
            result,
            Err(ChainError::AppendFailure(BlockError::Encoding(_)))
        ));
        assert_eq!(chain.blocks(), before.as_slice());
        assert_eq!(chain.height(), 1);

        let next = chain.append_payload(&json!({ "n": 2 })).unwrap().clone();
        assert_eq!(next.height, 2);
        assert_eq!(next.previous_block_hash, before[1].hash);
        assert!(chain.validate_chain().unwrap().is_valid);
    }

    #[test]
    fn test_find_by_hash() {
        let (mut chain, _) = test_chain(1_000);
        let hash = chain
            .append(Block::new(&json!({ "n": 1 })).unwrap())
            .unwrap()
            .hash
            .clone()
            .unwrap();

        let found = chain.find_by_hash(&hash).unwrap();
        assert_eq!(found.height, 1);

        assert!(matches!(
            chain.find_by_hash(&hash.to_uppercase()),
            Err(ChainError::NotFound(_))
        ));
        assert!(matches!(chain.find_by_hash("missing"), Err(ChainError::NotFound(_))));
    }

    #[test]
    fn test_find_by_height_out_of_range() {
        let (chain, _) = test_chain(1_000);
        assert!(chain.find_by_height(0).is_some());
        assert!(chain.find_by_height(1).is_none());
        assert!(chain.find_by_height(u64::MAX).is_none());
    }
}
