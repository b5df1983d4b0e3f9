//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the address codec, seed derivation, block layouts,
//! signatures and work validation. Every implementation must reproduce them
//! byte for byte.

use rai_core::{
    validate, Account, Amount, Block, BlockBuilder, BlockHash, ChangeBlock, KeyPair, OpenBlock,
    ReceiveBlock, SendBlock, Seed, Work, WorkRoot,
};
use serde::Serialize;

/// The seed every vector derives its keys from.
pub const SEED: &str = "9F1D53E732E48F25F94711D5B22086778278624F715D9B2BEC8FB81134E7C904";

/// The previous hash used by every non-first block vector; also the work root.
pub const ROOT: &str = "C8E5B875778702445B25657276ABC56AA9910B283537CA438B2CC59B0CF93712";

const SEED_BYTES: [u8; 32] = [
    0x9f, 0x1d, 0x53, 0xe7, 0x32, 0xe4, 0x8f, 0x25, 0xf9, 0x47, 0x11, 0xd5, 0xb2, 0x20, 0x86, 0x77,
    0x82, 0x78, 0x62, 0x4f, 0x71, 0x5d, 0x9b, 0x2b, 0xec, 0x8f, 0xb8, 0x11, 0x34, 0xe7, 0xc9, 0x04,
];

const ROOT_BYTES: [u8; 32] = [
    0xc8, 0xe5, 0xb8, 0x75, 0x77, 0x87, 0x02, 0x44, 0x5b, 0x25, 0x65, 0x72, 0x76, 0xab, 0xc5, 0x6a,
    0xa9, 0x91, 0x0b, 0x28, 0x35, 0x37, 0xca, 0x43, 0x8b, 0x2c, 0xc5, 0x9b, 0x0c, 0xf9, 0x37, 0x12,
];

/// An address vector: key bytes and their text form.
#[derive(Debug, Clone, Serialize)]
pub struct AddressVector {
    pub name: &'static str,
    pub public: &'static str,
    pub address: &'static str,
}

/// A seed derivation vector.
#[derive(Debug, Clone, Serialize)]
pub struct DerivationVector {
    pub index: u32,
    pub private: &'static str,
    pub public: &'static str,
    pub address: &'static str,
}

/// A block hash vector.
///
/// `build` receives the keypairs at index 0 and 1 of [`SEED`].
#[derive(Debug, Clone)]
pub struct BlockVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub build: fn(&KeyPair, &KeyPair) -> Block,
    /// Expected block hash (hex).
    pub expected_hash: &'static str,
    /// Expected signature (hex), empty when the vector only pins the hash.
    pub expected_signature: &'static str,
}

/// A work validity vector against the production threshold.
#[derive(Debug, Clone, Serialize)]
pub struct WorkVector {
    pub name: &'static str,
    pub root: &'static str,
    pub work: &'static str,
    pub valid: bool,
}

pub fn address_vectors() -> Vec<AddressVector> {
    vec![
        AddressVector {
            name: "zero key",
            public: "0000000000000000000000000000000000000000000000000000000000000000",
            address: "xrb_1111111111111111111111111111111111111111111111111111hifc8npp",
        },
        AddressVector {
            name: "all-ones key",
            public: "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
            address: "xrb_3zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzc3yoon41",
        },
        AddressVector {
            name: "seed index 0",
            public: "8933B4083FE0E42A97FF0B7E16B9B2CEF93D31318700B328D6CF6CE931BBF8D4",
            address: "xrb_34bmpi65zr967cdzy4uy4twu7mqs9nrm53r1penffmuex6ruqy8nxp7ms1h1",
        },
    ]
}

pub fn derivation_vectors() -> Vec<DerivationVector> {
    vec![
        DerivationVector {
            index: 0,
            private: "7712B29E9E541E8B6D36AF7151C46714667AA69E509D7D4DAAB050E9731B2D43",
            public: "8933B4083FE0E42A97FF0B7E16B9B2CEF93D31318700B328D6CF6CE931BBF8D4",
            address: "xrb_34bmpi65zr967cdzy4uy4twu7mqs9nrm53r1penffmuex6ruqy8nxp7ms1h1",
        },
        DerivationVector {
            index: 1,
            private: "85A6F4618829397190319D19A5C3993C300AE4370B46DA0B670D5FD07C3835F6",
            public: "DAE58DB4087564DD1E3B32C2E301A9F288F2F006A31951816AB36E92F2A61548",
            address: "xrb_3pq7jpt1ixd6unh5pep4we1tmwnaydr1farsc81poeugkdsce7cain19myin",
        },
    ]
}

fn root() -> BlockHash {
    BlockHash(ROOT_BYTES)
}

pub fn block_vectors() -> Vec<BlockVector> {
    vec![
        BlockVector {
            name: "state receive, balance 1",
            build: |kp0, _| {
                BlockBuilder::new(kp0.account())
                    .previous(root())
                    .balance(Amount::raw(1))
                    .receive(&root())
                    .sign(kp0)
            },
            expected_hash: "A55E23AC39CC1889A5B6D9B6BA26D1018963146B4E26C30A08F6C24B42552112",
            expected_signature: "B84B86A435719BB734D5564C4CA38E834FD54C650327510192510A532FB9F0D63A31EDE38060C7346E52648FF30305AC9FACEE3C971B91DA5245F489F1BD420F",
        },
        BlockVector {
            name: "state send, large balance",
            build: |kp0, kp1| {
                BlockBuilder::new(kp0.account())
                    .previous(root())
                    .representative(kp1.account())
                    .balance(Amount::raw(19_999_999_999_999_999_999_999_999_999_900))
                    .send(&kp1.account())
                    .sign(kp0)
            },
            expected_hash: "3E0308228C0B992C0A283F9417FDD5969F2FC2CEB274110566D06DCC5AF6837A",
            expected_signature: "3C5568DDF90263FCFCF47CD02B1EF69A8E61744AB3C4EDEAABDE7A823A3DB1844EE875DDB540D5EB828AB24D3B272E3F20E20CF23906D74DBED84B0B8C48A903",
        },
        BlockVector {
            name: "state send, zero balance",
            build: |kp0, kp1| {
                BlockBuilder::new(kp0.account())
                    .previous(root())
                    .send(&kp1.account())
                    .sign(kp0)
            },
            expected_hash: "937FA5E00041370E957937F982C3F6C69F0DD338CF56C921C422019F6DF6115D",
            expected_signature: "",
        },
        BlockVector {
            name: "state open",
            build: |kp0, kp1| {
                BlockBuilder::new(kp1.account())
                    .representative(kp0.account())
                    .balance(Amount::raw(1))
                    .open(&root())
                    .sign(kp1)
            },
            expected_hash: "1988E82350F3781C2364CA78BA75B88782472046BFB555D23FB49E83B4E42030",
            expected_signature: "",
        },
        BlockVector {
            name: "legacy send",
            build: |kp0, _| SendBlock::new(root(), kp0.account(), Amount::raw(1), kp0).into(),
            expected_hash: "E790DDD52434E2F31D05BF265BDB98CE7A142DB8043860B8119E170C0A48EA29",
            expected_signature: "",
        },
        BlockVector {
            name: "legacy receive",
            build: |kp0, kp1| {
                ReceiveBlock::new(root(), BlockHash(kp1.account().0), kp0).into()
            },
            expected_hash: "D06E110018F68EEF9C15BB758F98CB33FE6CDA56D861B27210DAEFF49AEA9E5F",
            expected_signature: "",
        },
        BlockVector {
            name: "legacy open",
            build: |kp0, kp1| OpenBlock::new(root(), kp0.account(), kp1).into(),
            expected_hash: "5E81E080EE8B836DDFA9DA64951D75528D920979CE2EFDF9A92B37C0646A1473",
            expected_signature: "F485A7D6507241771EBAF0861063BA7AFB85105B273AEA7F17EE23232B9F9E38F1459E6EDF50B6F6189D2F2E66A02A03B38EB324F1392E1F3026A1AC61FE850C",
        },
        BlockVector {
            name: "legacy change",
            build: |kp0, kp1| ChangeBlock::new(root(), kp1.account(), kp0).into(),
            expected_hash: "D06E110018F68EEF9C15BB758F98CB33FE6CDA56D861B27210DAEFF49AEA9E5F",
            expected_signature: "",
        },
    ]
}

pub fn work_vectors() -> Vec<WorkVector> {
    vec![
        WorkVector {
            name: "recorded work",
            root: ROOT,
            work: "266063092558d903",
            valid: true,
        },
        WorkVector {
            name: "zero nonce",
            root: ROOT,
            work: "0000000000000000",
            valid: false,
        },
        WorkVector {
            name: "recorded work, wrong root",
            root: "0000000000000000000000000000000000000000000000000000000000000000",
            work: "266063092558d903",
            valid: false,
        },
    ]
}

/// The two keypairs block vectors are built from.
pub fn vector_keypairs() -> (KeyPair, KeyPair) {
    let seed = Seed::from_bytes(SEED_BYTES);
    (seed.derive(0), seed.derive(1))
}

/// Build the block a vector describes.
pub fn generate_block_from_vector(vector: &BlockVector) -> Block {
    let (kp0, kp1) = vector_keypairs();
    (vector.build)(&kp0, &kp1)
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();

    for v in address_vectors() {
        let actual = Account::from_hex(v.public)
            .map(|a| a.to_address())
            .unwrap_or_default();
        results.push((v.name.to_string(), actual == v.address, actual));
    }

    let (kp0, kp1) = vector_keypairs();
    for v in block_vectors() {
        let block = (v.build)(&kp0, &kp1);
        let hash = block.hash().to_hex();
        let signature = block.signature().to_hex();
        let matches = hash == v.expected_hash
            && (v.expected_signature.is_empty() || signature == v.expected_signature);
        results.push((v.name.to_string(), matches, hash));
    }

    for v in work_vectors() {
        let actual = match (Work::from_hex(v.work), WorkRoot::from_hex(v.root)) {
            (Ok(work), Ok(root)) => validate(work, &root),
            _ => false,
        };
        results.push((v.name.to_string(), actual == v.valid, actual.to_string()));
    }

    results
}

/// Export the fixed vectors as JSON for other implementations.
pub fn vectors_json() -> serde_json::Value {
    let blocks: Vec<_> = block_vectors()
        .iter()
        .map(|v| {
            let block = generate_block_from_vector(v);
            serde_json::json!({
                "name": v.name,
                "block": block,
                "hash": v.expected_hash,
            })
        })
        .collect();

    serde_json::json!({
        "seed": SEED,
        "addresses": address_vectors(),
        "derivations": derivation_vectors(),
        "blocks": blocks,
        "work": work_vectors(),
    })
}
