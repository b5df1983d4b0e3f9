//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rai::{BlockFactory, LocalWorkSource, RaiConfig};
use rai_core::{Account, Amount, Block, BlockBuilder, BlockHash, KeyPair, Seed, Work, WorkThreshold};
use rai_work::{WorkConfig, WorkGenerator};
use zeroize::Zeroizing;

/// A threshold roughly one in sixteen nonces meet.
///
/// Fast enough to generate real work inside unit tests.
pub const EASY_THRESHOLD: WorkThreshold = WorkThreshold::new(0xF000_0000_0000_0000);

/// A work config using [`EASY_THRESHOLD`] on a single worker.
pub fn easy_work_config() -> WorkConfig {
    WorkConfig::default().threshold(EASY_THRESHOLD).workers(1)
}

/// A factory config using [`easy_work_config`].
pub fn easy_config() -> RaiConfig {
    RaiConfig {
        work: easy_work_config(),
        ..RaiConfig::default()
    }
}

/// A test fixture with a seed and the keypair at one index.
pub struct TestFixture {
    pub seed: Seed,
    pub index: u32,
    pub keypair: KeyPair,
}

impl TestFixture {
    /// Create a new test fixture with a random seed.
    pub fn new() -> Self {
        Self::from_seed(Seed::generate(), 0)
    }

    /// Create with a deterministic seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_seed(Seed::from_bytes(seed), 0)
    }

    fn from_seed(seed: Seed, index: u32) -> Self {
        let keypair = seed.derive(index);
        Self {
            seed,
            index,
            keypair,
        }
    }

    /// The fixture's account.
    pub fn account(&self) -> Account {
        self.keypair.account()
    }

    /// A fixture for another index of the same seed.
    pub fn sibling(&self, index: u32) -> Self {
        Self::from_seed(copy_seed(&self.seed), index)
    }

    /// Create a state open block without work.
    pub fn make_open(&self, source: BlockHash, balance: Amount) -> Block {
        BlockBuilder::new(self.account())
            .balance(balance)
            .open(&source)
            .sign(&self.keypair)
    }

    /// Create a state send block without work.
    pub fn make_send(&self, previous: BlockHash, destination: &Account, balance: Amount) -> Block {
        BlockBuilder::new(self.account())
            .previous(previous)
            .balance(balance)
            .send(destination)
            .sign(&self.keypair)
    }

    /// Create a state receive block without work.
    pub fn make_receive(&self, previous: BlockHash, source: BlockHash, balance: Amount) -> Block {
        BlockBuilder::new(self.account())
            .previous(previous)
            .balance(balance)
            .receive(&source)
            .sign(&self.keypair)
    }

    /// Create a state change block without work.
    pub fn make_change(
        &self,
        previous: BlockHash,
        representative: Account,
        balance: Amount,
    ) -> Block {
        BlockBuilder::new(self.account())
            .previous(previous)
            .representative(representative)
            .balance(balance)
            .change()
            .sign(&self.keypair)
    }

    /// A factory for this account generating work at [`EASY_THRESHOLD`].
    pub fn factory(&self) -> BlockFactory<LocalWorkSource> {
        BlockFactory::new(
            self.keypair.clone(),
            LocalWorkSource::new(easy_work_config()),
            easy_config(),
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate easy work for `block` and attach it.
pub fn with_easy_work(block: Block) -> rai_work::Result<Block> {
    let work: Work = WorkGenerator::new(easy_work_config()).generate(&block.work_root())?;
    Ok(block.with_work(work))
}

/// Copy a seed without leaving its bytes on the stack.
fn copy_seed(seed: &Seed) -> Seed {
    let mut bytes = Zeroizing::new([0u8; 32]);
    bytes.copy_from_slice(seed.expose_secret());
    Seed::from(bytes)
}

/// Create fixtures for accounts 0..n of one seed.
pub fn multi_party_fixtures(n: u32) -> Vec<TestFixture> {
    let seed = Seed::generate();
    (0..n)
        .map(|index| TestFixture::from_seed(copy_seed(&seed), index))
        .collect()
}
