//! The block factory: signed, work-carrying state blocks for one account.
//!
//! The factory brings together a derived keypair, the block builder and a
//! work source. It does not persist anything; callers keep an
//! [`AccountHead`] per account and the factory advances it on success.

use std::sync::Arc;

use rai_core::{
    validate_block_with, Account, Amount, Block, BlockBuilder, BlockHash, KeyPair, Seed,
    ValidationError,
};
use rai_work::{CancelToken, WorkConfig};

use crate::error::{RaiError, Result};
use crate::source::WorkSource;

/// Configuration for the block factory.
#[derive(Debug, Clone)]
pub struct RaiConfig {
    /// Threshold the factory validates against, and the local search config.
    pub work: WorkConfig,
    /// Whether to validate each block (signature and work) before returning it.
    pub validate_on_build: bool,
}

impl Default for RaiConfig {
    fn default() -> Self {
        Self {
            work: WorkConfig::default(),
            validate_on_build: true,
        }
    }
}

/// The latest known state of an account chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountHead {
    pub account: Account,
    /// Hash of the newest block, zero if the account is not opened yet.
    pub frontier: BlockHash,
    pub representative: Account,
    pub balance: Amount,
}

impl AccountHead {
    /// An account with no blocks: representing itself, zero balance.
    pub fn unopened(account: Account) -> Self {
        Self {
            account,
            frontier: BlockHash::ZERO,
            representative: account,
            balance: Amount::ZERO,
        }
    }

    /// Check if the account has at least one block.
    pub fn is_opened(&self) -> bool {
        !self.frontier.is_zero()
    }

    fn advance(&mut self, block: &Block) {
        if let Block::State(b) = block {
            self.frontier = block.hash();
            self.representative = b.representative;
            self.balance = b.balance;
        }
    }
}

/// Builds blocks for a single account.
///
/// Provides:
/// - Opening an account from a pending send
/// - Sends, receives and representative changes on an opened account
/// - Attaching work to blocks built elsewhere
pub struct BlockFactory<W: WorkSource> {
    keypair: KeyPair,
    work: Arc<W>,
    config: RaiConfig,
}

impl<W: WorkSource> BlockFactory<W> {
    /// Create a factory for an existing keypair.
    pub fn new(keypair: KeyPair, work: W, config: RaiConfig) -> Self {
        Self {
            keypair,
            work: Arc::new(work),
            config,
        }
    }

    /// Create a factory for the account at `index` of `seed`.
    pub fn from_seed(seed: &Seed, index: u32, work: W, config: RaiConfig) -> Self {
        Self::new(seed.derive(index), work, config)
    }

    /// The account this factory signs for.
    pub fn account(&self) -> Account {
        self.keypair.account()
    }

    pub fn config(&self) -> &RaiConfig {
        &self.config
    }

    /// A fresh head for this factory's account.
    pub fn unopened_head(&self) -> AccountHead {
        AccountHead::unopened(self.account())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State Blocks
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the account by receiving `amount` from the send `source`.
    pub async fn open(
        &self,
        head: &mut AccountHead,
        source: BlockHash,
        amount: Amount,
        representative: Account,
    ) -> Result<Block> {
        self.check_owner(head)?;
        if head.is_opened() {
            return Err(RaiError::InvalidOperation(format!(
                "account {} is already open",
                head.account
            )));
        }

        let builder = BlockBuilder::new(head.account)
            .representative(representative)
            .balance(amount)
            .open(&source);
        self.finish(head, builder, CancelToken::new()).await
    }

    /// Receive `amount` from the send `source`.
    pub async fn receive(
        &self,
        head: &mut AccountHead,
        source: BlockHash,
        amount: Amount,
    ) -> Result<Block> {
        self.check_opened(head)?;
        let balance = head
            .balance
            .checked_add(amount)
            .ok_or(RaiError::BalanceOverflow {
                balance: head.balance,
                amount,
            })?;

        let builder = self.next(head).balance(balance).receive(&source);
        self.finish(head, builder, CancelToken::new()).await
    }

    /// Send `amount` to `destination`.
    pub async fn send(
        &self,
        head: &mut AccountHead,
        destination: &Account,
        amount: Amount,
    ) -> Result<Block> {
        self.check_opened(head)?;
        let balance = head
            .balance
            .checked_sub(amount)
            .ok_or(RaiError::InsufficientBalance {
                balance: head.balance,
                amount,
            })?;

        let builder = self.next(head).balance(balance).send(destination);
        self.finish(head, builder, CancelToken::new()).await
    }

    /// Delegate to a new representative.
    pub async fn change(&self, head: &mut AccountHead, representative: Account) -> Result<Block> {
        self.check_opened(head)?;
        let builder = self.next(head).representative(representative).change();
        self.finish(head, builder, CancelToken::new()).await
    }

    /// Sign `builder`, attach work and advance `head`, stopping early if
    /// `cancel` fires.
    pub async fn finish(
        &self,
        head: &mut AccountHead,
        builder: BlockBuilder,
        cancel: CancelToken,
    ) -> Result<Block> {
        self.check_owner(head)?;
        if builder.account() != head.account {
            return Err(RaiError::InvalidOperation(format!(
                "block is for {}, head belongs to {}",
                builder.account(),
                head.account
            )));
        }

        let intent = builder.intent();
        let block = builder.sign(&self.keypair);
        let block = self.attach_work(block, cancel).await?;

        tracing::info!(
            account = %head.account,
            intent = intent.as_str(),
            hash = %block.hash(),
            "built block"
        );

        head.advance(&block);
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Work
    // ─────────────────────────────────────────────────────────────────────────

    /// Obtain work for `block` and return it with the work attached.
    ///
    /// The signature is untouched. With `validate_on_build` the finished
    /// block is checked against the configured threshold.
    pub async fn attach_work(&self, block: Block, cancel: CancelToken) -> Result<Block> {
        let root = block.work_root();
        tracing::debug!(root = ?root, block_type = block.block_type().as_str(), "requesting work");

        let work = self.work.generate(root, cancel).await?;
        let block = block.with_work(work);

        if self.config.validate_on_build {
            self.validate(&block)?;
        }
        Ok(block)
    }

    /// Validate a block signed by this factory's account.
    pub fn validate(&self, block: &Block) -> std::result::Result<(), ValidationError> {
        validate_block_with(block, &self.account(), self.config.work.threshold)
    }

    fn next(&self, head: &AccountHead) -> BlockBuilder {
        BlockBuilder::new(head.account)
            .previous(head.frontier)
            .representative(head.representative)
            .balance(head.balance)
    }

    fn check_owner(&self, head: &AccountHead) -> Result<()> {
        if head.account != self.account() {
            return Err(RaiError::InvalidOperation(format!(
                "head belongs to {}, factory signs for {}",
                head.account,
                self.account()
            )));
        }
        Ok(())
    }

    fn check_opened(&self, head: &AccountHead) -> Result<()> {
        self.check_owner(head)?;
        if !head.is_opened() {
            return Err(RaiError::InvalidOperation(format!(
                "account {} is not open",
                head.account
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rai_core::{verify, Work, WorkRoot, WorkThreshold};
    use rai_work::WorkError;

    use crate::source::LocalWorkSource;

    const EASY: WorkThreshold = WorkThreshold::new(0xF000_0000_0000_0000);
    const SEED: &str = "9F1D53E732E48F25F94711D5B22086778278624F715D9B2BEC8FB81134E7C904";

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn easy_config() -> RaiConfig {
        RaiConfig {
            work: WorkConfig::default().threshold(EASY).workers(1),
            validate_on_build: true,
        }
    }

    fn make_factory(index: u32) -> BlockFactory<LocalWorkSource> {
        let seed = Seed::from_hex(SEED).unwrap();
        let config = easy_config();
        BlockFactory::from_seed(&seed, index, LocalWorkSource::new(config.work.clone()), config)
    }

    /// Always answers with the same nonce.
    struct FixedWorkSource(Work);

    #[async_trait]
    impl WorkSource for FixedWorkSource {
        async fn generate(&self, _root: WorkRoot, _cancel: CancelToken) -> Result<Work> {
            Ok(self.0)
        }
    }

    /// Never finds anything.
    struct RefusingWorkSource;

    #[async_trait]
    impl WorkSource for RefusingWorkSource {
        async fn generate(&self, _root: WorkRoot, _cancel: CancelToken) -> Result<Work> {
            Err(WorkError::AttemptsExhausted { attempts: 0 }.into())
        }
    }

    #[tokio::test]
    async fn test_open_send_receive_change() {
        init_tracing();
        let alice = make_factory(0);
        let bob = make_factory(1);
        let source = BlockHash::from_bytes([0x11; 32]);

        let mut a = alice.unopened_head();
        let open = alice
            .open(&mut a, source, Amount::raw(100), alice.account())
            .await
            .unwrap();
        assert!(open.is_first());
        assert_eq!(a.frontier, open.hash());
        assert_eq!(a.balance, Amount::raw(100));

        let send = alice.send(&mut a, &bob.account(), Amount::raw(30)).await.unwrap();
        assert_eq!(send.previous(), open.hash());
        assert_eq!(a.balance, Amount::raw(70));

        let mut b = bob.unopened_head();
        let bob_open = bob
            .open(&mut b, send.hash(), Amount::raw(30), alice.account())
            .await
            .unwrap();
        assert_eq!(bob_open.work_root(), WorkRoot::from(bob.account()));

        let receive = alice
            .receive(&mut a, BlockHash::from_bytes([0x22; 32]), Amount::raw(5))
            .await
            .unwrap();
        assert_eq!(a.balance, Amount::raw(75));
        assert_eq!(receive.work_root(), WorkRoot::from(send.hash()));

        let change = alice.change(&mut a, bob.account()).await.unwrap();
        assert_eq!(a.representative, bob.account());
        assert_eq!(a.balance, Amount::raw(75));
        assert_eq!(change.representative(), Some(bob.account()));

        for block in [&open, &send, &receive, &change] {
            assert!(alice.validate(block).is_ok());
            assert!(verify(&alice.account(), &block.hash(), block.signature()));
        }
    }

    #[tokio::test]
    async fn test_send_more_than_balance() {
        let alice = make_factory(0);
        let mut a = alice.unopened_head();
        alice
            .open(&mut a, BlockHash::from_bytes([0x11; 32]), Amount::raw(10), alice.account())
            .await
            .unwrap();
        let before = a;

        let err = alice
            .send(&mut a, &alice.account(), Amount::raw(11))
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InsufficientBalance { .. }));
        assert_eq!(a, before);
    }

    #[tokio::test]
    async fn test_receive_overflow() {
        let alice = make_factory(0);
        let mut a = alice.unopened_head();
        alice
            .open(&mut a, BlockHash::from_bytes([0x11; 32]), Amount::MAX, alice.account())
            .await
            .unwrap();
        let err = alice
            .receive(&mut a, BlockHash::from_bytes([0x22; 32]), Amount::raw(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::BalanceOverflow { .. }));
    }

    #[tokio::test]
    async fn test_state_checks() {
        let alice = make_factory(0);
        let bob = make_factory(1);

        let mut a = alice.unopened_head();
        let err = alice
            .send(&mut a, &bob.account(), Amount::raw(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InvalidOperation(_)));

        let mut b = bob.unopened_head();
        let err = alice
            .open(&mut b, BlockHash::from_bytes([0x11; 32]), Amount::raw(1), bob.account())
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InvalidOperation(_)));

        alice
            .open(&mut a, BlockHash::from_bytes([0x11; 32]), Amount::raw(1), alice.account())
            .await
            .unwrap();
        let err = alice
            .open(&mut a, BlockHash::from_bytes([0x12; 32]), Amount::raw(1), alice.account())
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_bad_work_is_rejected_on_build() {
        let seed = Seed::from_hex(SEED).unwrap();
        let factory = BlockFactory::from_seed(&seed, 0, FixedWorkSource(Work::new(0)), RaiConfig::default());
        let mut head = factory.unopened_head();

        let err = factory
            .open(&mut head, BlockHash::from_bytes([0x11; 32]), Amount::raw(1), factory.account())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RaiError::Validation(ValidationError::InsufficientWork { .. })
        ));
        assert!(!head.is_opened());
    }

    #[tokio::test]
    async fn test_validation_can_be_disabled() {
        let seed = Seed::from_hex(SEED).unwrap();
        let config = RaiConfig {
            validate_on_build: false,
            ..RaiConfig::default()
        };
        let factory = BlockFactory::from_seed(&seed, 0, FixedWorkSource(Work::new(0)), config);
        let mut head = factory.unopened_head();

        let block = factory
            .open(&mut head, BlockHash::from_bytes([0x11; 32]), Amount::raw(1), factory.account())
            .await
            .unwrap();
        assert_eq!(block.work(), Some(Work::new(0)));
    }

    #[tokio::test]
    async fn test_work_error_propagates() {
        let seed = Seed::from_hex(SEED).unwrap();
        let factory = BlockFactory::from_seed(&seed, 0, RefusingWorkSource, RaiConfig::default());
        let mut head = factory.unopened_head();

        let err = factory
            .open(&mut head, BlockHash::from_bytes([0x11; 32]), Amount::raw(1), factory.account())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RaiError::Work(WorkError::AttemptsExhausted { attempts: 0 })
        ));
    }

    #[tokio::test]
    async fn test_attach_work_to_external_block() {
        let factory = make_factory(0);
        let block = BlockBuilder::new(factory.account())
            .previous(BlockHash::from_bytes([0x33; 32]))
            .change()
            .sign(&factory.keypair);
        let signature = *block.signature();

        let block = factory.attach_work(block, CancelToken::new()).await.unwrap();
        assert_eq!(*block.signature(), signature);
        assert!(factory.validate(&block).is_ok());
    }

    #[tokio::test]
    async fn test_finish_rejects_foreign_builder() {
        let seed = Seed::from_hex(SEED).unwrap();
        let config = RaiConfig {
            validate_on_build: false,
            ..RaiConfig::default()
        };
        let factory = BlockFactory::from_seed(&seed, 0, FixedWorkSource(Work::new(0)), config);
        let other = seed.derive(1).account();
        let source = BlockHash::from_bytes([0x11; 32]);

        // Builder for another account against our own head.
        let mut head = factory.unopened_head();
        let builder = BlockBuilder::new(other).balance(Amount::raw(1)).open(&source);
        let err = factory
            .finish(&mut head, builder, CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InvalidOperation(_)));
        assert!(!head.is_opened());

        // Another account's head, whatever the builder says.
        let mut foreign = AccountHead::unopened(other);
        let builder = BlockBuilder::new(other).balance(Amount::raw(1)).open(&source);
        let err = factory
            .finish(&mut foreign, builder, CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RaiError::InvalidOperation(_)));
        assert!(!foreign.is_opened());

        // Our own builder and head still go through.
        let builder = BlockBuilder::new(factory.account()).balance(Amount::raw(1)).open(&source);
        let block = factory
            .finish(&mut head, builder, CancelToken::new())
            .await
            .unwrap();
        assert_eq!(head.frontier, block.hash());
    }
}
