//! Blocks: the signed, work-carrying unit an account chain is built from.
//!
//! A block is immutable once signed. The signature covers only the block hash,
//! so work can be attached or replaced afterwards with [`Block::with_work`]
//! without touching the signature.

use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::canonical::block_hash;
use crate::crypto::{KeyPair, Signature};
use crate::types::{Amount, BlockHash, Link};
use crate::work::{Work, WorkRoot};

/// Discriminator for the five block layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Send,
    Receive,
    Open,
    Change,
    State,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
            Self::Open => "open",
            Self::Change => "change",
            Self::State => "state",
        }
    }
}

/// A universal block: the full account state after this block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlock {
    pub account: Account,

    /// Hash of the account's previous block, zero for the first block.
    pub previous: BlockHash,

    pub representative: Account,

    /// Balance after this block.
    pub balance: Amount,

    /// Destination account, source hash, or zero, depending on intent.
    pub link: Link,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,

    pub signature: Signature,
}

/// Legacy send: the remaining balance after sending to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendBlock {
    pub previous: BlockHash,
    pub destination: Account,
    pub balance: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,
    pub signature: Signature,
}

/// Legacy receive of the send identified by `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveBlock {
    pub previous: BlockHash,
    pub source: BlockHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,
    pub signature: Signature,
}

/// Legacy open: an account's first block, receiving `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenBlock {
    pub source: BlockHash,
    pub representative: Account,
    pub account: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,
    pub signature: Signature,
}

/// Legacy representative change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeBlock {
    pub previous: BlockHash,
    pub representative: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,
    pub signature: Signature,
}

impl SendBlock {
    /// Build and sign a legacy send.
    pub fn new(previous: BlockHash, destination: Account, balance: Amount, keypair: &KeyPair) -> Self {
        let mut block = Self {
            previous,
            destination,
            balance,
            work: None,
            signature: Signature::ZERO,
        };
        block.signature = keypair.sign_hash(&Block::Send(block.clone()).hash());
        block
    }
}

impl ReceiveBlock {
    /// Build and sign a legacy receive.
    pub fn new(previous: BlockHash, source: BlockHash, keypair: &KeyPair) -> Self {
        let mut block = Self {
            previous,
            source,
            work: None,
            signature: Signature::ZERO,
        };
        block.signature = keypair.sign_hash(&Block::Receive(block.clone()).hash());
        block
    }
}

impl OpenBlock {
    /// Build and sign a legacy open for the keypair's own account.
    pub fn new(source: BlockHash, representative: Account, keypair: &KeyPair) -> Self {
        let mut block = Self {
            source,
            representative,
            account: keypair.account(),
            work: None,
            signature: Signature::ZERO,
        };
        block.signature = keypair.sign_hash(&Block::Open(block.clone()).hash());
        block
    }
}

impl ChangeBlock {
    /// Build and sign a legacy change.
    pub fn new(previous: BlockHash, representative: Account, keypair: &KeyPair) -> Self {
        let mut block = Self {
            previous,
            representative,
            work: None,
            signature: Signature::ZERO,
        };
        block.signature = keypair.sign_hash(&Block::Change(block.clone()).hash());
        block
    }
}

/// Any block, tagged by its `type` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Send(SendBlock),
    Receive(ReceiveBlock),
    Open(OpenBlock),
    Change(ChangeBlock),
    State(StateBlock),
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Send(_) => BlockType::Send,
            Self::Receive(_) => BlockType::Receive,
            Self::Open(_) => BlockType::Open,
            Self::Change(_) => BlockType::Change,
            Self::State(_) => BlockType::State,
        }
    }

    /// Compute the block hash (Blake2b-256 of the canonical layout).
    pub fn hash(&self) -> BlockHash {
        block_hash(self)
    }

    /// The previous block hash; zero for an account's first block.
    pub fn previous(&self) -> BlockHash {
        match self {
            Self::Send(b) => b.previous,
            Self::Receive(b) => b.previous,
            Self::Open(_) => BlockHash::ZERO,
            Self::Change(b) => b.previous,
            Self::State(b) => b.previous,
        }
    }

    /// The owning account, when the layout names it.
    ///
    /// Legacy send, receive and change blocks only identify their account
    /// through the chain they extend.
    pub fn account(&self) -> Option<Account> {
        match self {
            Self::Open(b) => Some(b.account),
            Self::State(b) => Some(b.account),
            _ => None,
        }
    }

    pub fn representative(&self) -> Option<Account> {
        match self {
            Self::Open(b) => Some(b.representative),
            Self::Change(b) => Some(b.representative),
            Self::State(b) => Some(b.representative),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<Amount> {
        match self {
            Self::Send(b) => Some(b.balance),
            Self::State(b) => Some(b.balance),
            _ => None,
        }
    }

    /// Check if this is the first block of an account chain.
    pub fn is_first(&self) -> bool {
        match self {
            Self::Open(_) => true,
            Self::State(b) => b.previous.is_zero(),
            _ => false,
        }
    }

    /// The value proof-of-work is computed against.
    pub fn work_root(&self) -> WorkRoot {
        match self {
            Self::Open(b) => WorkRoot::from(b.account),
            Self::State(b) if b.previous.is_zero() => WorkRoot::from(b.account),
            other => WorkRoot::from(other.previous()),
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            Self::Send(b) => &b.signature,
            Self::Receive(b) => &b.signature,
            Self::Open(b) => &b.signature,
            Self::Change(b) => &b.signature,
            Self::State(b) => &b.signature,
        }
    }

    pub fn work(&self) -> Option<Work> {
        match self {
            Self::Send(b) => b.work,
            Self::Receive(b) => b.work,
            Self::Open(b) => b.work,
            Self::Change(b) => b.work,
            Self::State(b) => b.work,
        }
    }

    /// Return the same block carrying `work`. The signature stays valid.
    pub fn with_work(mut self, work: Work) -> Self {
        *self.work_mut() = Some(work);
        self
    }

    /// Return the same block signed by `keypair`.
    pub fn signed(mut self, keypair: &KeyPair) -> Self {
        let signature = keypair.sign_hash(&self.hash());
        *self.signature_mut() = signature;
        self
    }

    fn work_mut(&mut self) -> &mut Option<Work> {
        match self {
            Self::Send(b) => &mut b.work,
            Self::Receive(b) => &mut b.work,
            Self::Open(b) => &mut b.work,
            Self::Change(b) => &mut b.work,
            Self::State(b) => &mut b.work,
        }
    }

    fn signature_mut(&mut self) -> &mut Signature {
        match self {
            Self::Send(b) => &mut b.signature,
            Self::Receive(b) => &mut b.signature,
            Self::Open(b) => &mut b.signature,
            Self::Change(b) => &mut b.signature,
            Self::State(b) => &mut b.signature,
        }
    }
}

impl From<StateBlock> for Block {
    fn from(block: StateBlock) -> Self {
        Self::State(block)
    }
}

impl From<SendBlock> for Block {
    fn from(block: SendBlock) -> Self {
        Self::Send(block)
    }
}

impl From<ReceiveBlock> for Block {
    fn from(block: ReceiveBlock) -> Self {
        Self::Receive(block)
    }
}

impl From<OpenBlock> for Block {
    fn from(block: OpenBlock) -> Self {
        Self::Open(block)
    }
}

impl From<ChangeBlock> for Block {
    fn from(block: ChangeBlock) -> Self {
        Self::Change(block)
    }
}

/// What a state block does; fixes the meaning of its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockIntent {
    /// Link is the destination account.
    Send,
    /// Link is the source block hash.
    Receive,
    /// First block: previous is zero, link is the source block hash.
    Open,
    /// Link is zero.
    Change,
}

impl BlockIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
            Self::Open => "open",
            Self::Change => "change",
        }
    }
}

/// Builder for state blocks.
///
/// Pick an intent with [`send`](Self::send), [`receive`](Self::receive),
/// [`open`](Self::open) or [`change`](Self::change); the builder fills in
/// the link accordingly.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    account: Account,
    previous: BlockHash,
    representative: Account,
    balance: Amount,
    link: Link,
    intent: BlockIntent,
    work: Option<Work>,
}

impl BlockBuilder {
    /// Start building a block for `account`.
    ///
    /// Defaults to a change to the account itself with zero balance.
    pub fn new(account: Account) -> Self {
        Self {
            account,
            previous: BlockHash::ZERO,
            representative: account,
            balance: Amount::ZERO,
            link: Link::ZERO,
            intent: BlockIntent::Change,
            work: None,
        }
    }

    /// Set the previous block hash.
    pub fn previous(mut self, previous: BlockHash) -> Self {
        self.previous = previous;
        self
    }

    /// Set the representative.
    pub fn representative(mut self, representative: Account) -> Self {
        self.representative = representative;
        self
    }

    /// Set the balance after this block.
    pub fn balance(mut self, balance: Amount) -> Self {
        self.balance = balance;
        self
    }

    /// Send to `destination`.
    pub fn send(mut self, destination: &Account) -> Self {
        self.intent = BlockIntent::Send;
        self.link = Link::destination(destination);
        self
    }

    /// Receive the send identified by `source`.
    pub fn receive(mut self, source: &BlockHash) -> Self {
        self.intent = BlockIntent::Receive;
        self.link = Link::source(source);
        self
    }

    /// Open the account by receiving `source`. Clears `previous`.
    pub fn open(mut self, source: &BlockHash) -> Self {
        self.intent = BlockIntent::Open;
        self.previous = BlockHash::ZERO;
        self.link = Link::source(source);
        self
    }

    /// Change representative only.
    pub fn change(mut self) -> Self {
        self.intent = BlockIntent::Change;
        self.link = Link::ZERO;
        self
    }

    /// Attach precomputed work.
    pub fn work(mut self, work: Work) -> Self {
        self.work = Some(work);
        self
    }

    pub fn account(&self) -> Account {
        self.account
    }

    pub fn intent(&self) -> BlockIntent {
        self.intent
    }

    /// The root work for this block must be computed against.
    pub fn work_root(&self) -> WorkRoot {
        if self.previous.is_zero() {
            WorkRoot::from(self.account)
        } else {
            WorkRoot::from(self.previous)
        }
    }

    /// Build and sign the block.
    pub fn sign(self, keypair: &KeyPair) -> Block {
        Block::State(StateBlock {
            account: self.account,
            previous: self.previous,
            representative: self.representative,
            balance: self.balance,
            link: self.link,
            work: self.work,
            signature: Signature::ZERO,
        })
        .signed(keypair)
    }
}
