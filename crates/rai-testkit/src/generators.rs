//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rai_core::{
    codec, Account, Amount, Block, BlockBuilder, BlockHash, ChangeBlock, KeyPair, OpenBlock, RawKey,
    ReceiveBlock, SendBlock, Work, WorkRoot,
};

/// Generate arbitrary 32-byte key material.
pub fn key_bytes() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    key_bytes().prop_map(|bytes| KeyPair::from_private(RawKey::from_bytes(bytes)))
}

/// Generate a random Account.
///
/// Any 32 bytes are a valid account for the codec, curve point or not.
pub fn account() -> impl Strategy<Value = Account> {
    key_bytes().prop_map(Account::from_bytes)
}

/// Generate a well-formed address from random payload symbols.
///
/// The payload is drawn as text, then given its correct checksum.
pub fn address() -> impl Strategy<Value = String> {
    "[13][13456789abcdefghijkmnopqrstuwxyz]{51}".prop_filter_map("payload", |payload| {
        let key = codec::bits::decode_key(payload.as_bytes()).ok()?;
        let check = codec::bits::encode_checksum(&codec::checksum::account_checksum(&key));
        let check = String::from_utf8(check.to_vec()).ok()?;
        Some(format!("{}{}{}", codec::ADDRESS_PREFIX, payload, check))
    })
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    key_bytes().prop_map(BlockHash::from_bytes)
}

/// Generate a non-zero BlockHash.
pub fn nonzero_block_hash() -> impl Strategy<Value = BlockHash> {
    block_hash().prop_filter("zero hash", |h| !h.is_zero())
}

/// Generate a random Amount over the full 128-bit range.
pub fn amount() -> impl Strategy<Value = Amount> {
    any::<u128>().prop_map(Amount::raw)
}

/// Generate a random work nonce.
pub fn work() -> impl Strategy<Value = Work> {
    any::<u64>().prop_map(Work::new)
}

/// Generate a random work root.
pub fn work_root() -> impl Strategy<Value = WorkRoot> {
    key_bytes().prop_map(WorkRoot)
}

/// The shape of a generated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    StateSend,
    StateReceive,
    StateOpen,
    StateChange,
    LegacySend,
    LegacyReceive,
    LegacyOpen,
    LegacyChange,
}

/// Generate a BlockShape.
pub fn block_shape() -> impl Strategy<Value = BlockShape> {
    prop_oneof![
        Just(BlockShape::StateSend),
        Just(BlockShape::StateReceive),
        Just(BlockShape::StateOpen),
        Just(BlockShape::StateChange),
        Just(BlockShape::LegacySend),
        Just(BlockShape::LegacyReceive),
        Just(BlockShape::LegacyOpen),
        Just(BlockShape::LegacyChange),
    ]
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub keypair: KeyPair,
    pub shape: BlockShape,
    pub previous: BlockHash,
    pub representative: Account,
    pub balance: Amount,
    /// Destination for sends, ignored otherwise.
    pub destination: Account,
    /// Source for receives and opens, ignored otherwise.
    pub source: BlockHash,
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            keypair(),
            block_shape(),
            nonzero_block_hash(),
            account(),
            amount(),
            account(),
            nonzero_block_hash(),
        )
            .prop_map(
                |(keypair, shape, previous, representative, balance, destination, source)| {
                    BlockParams {
                        keypair,
                        shape,
                        previous,
                        representative,
                        balance,
                        destination,
                        source,
                    }
                },
            )
            .boxed()
    }
}

/// Build a signed block (without work) from parameters.
pub fn block_from_params(params: &BlockParams) -> Block {
    let kp = &params.keypair;
    let state = || {
        BlockBuilder::new(kp.account())
            .previous(params.previous)
            .representative(params.representative)
            .balance(params.balance)
    };

    match params.shape {
        BlockShape::StateSend => state().send(&params.destination).sign(kp),
        BlockShape::StateReceive => state().receive(&params.source).sign(kp),
        BlockShape::StateOpen => state().open(&params.source).sign(kp),
        BlockShape::StateChange => state().change().sign(kp),
        BlockShape::LegacySend => {
            SendBlock::new(params.previous, params.destination, params.balance, kp).into()
        }
        BlockShape::LegacyReceive => ReceiveBlock::new(params.previous, params.source, kp).into(),
        BlockShape::LegacyOpen => OpenBlock::new(params.source, params.representative, kp).into(),
        BlockShape::LegacyChange => {
            ChangeBlock::new(params.previous, params.representative, kp).into()
        }
    }
}
