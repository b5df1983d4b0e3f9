//! Block validation: structure, proof-of-work and signature.

use crate::account::Account;
use crate::block::Block;
use crate::error::ValidationError;
use crate::work::{work_value, WorkThreshold};

/// Validate a block against the production work threshold.
///
/// This performs:
/// - Structural checks (see [`validate_block_structure`])
/// - Work presence and threshold check against the block's work root
/// - Signature verification over the block hash under `signer`
///
/// Legacy send, receive and change blocks do not carry their account, so
/// the signer is always passed explicitly. For blocks that do carry one it
/// must match.
pub fn validate_block(block: &Block, signer: &Account) -> Result<(), ValidationError> {
    validate_block_with(block, signer, WorkThreshold::PRODUCTION)
}

/// Validate a block against an arbitrary work threshold.
pub fn validate_block_with(
    block: &Block,
    signer: &Account,
    threshold: WorkThreshold,
) -> Result<(), ValidationError> {
    validate_block_structure(block)?;

    if let Some(account) = block.account() {
        if account != *signer {
            return Err(ValidationError::StructuralError(format!(
                "block belongs to {}, not {}",
                account, signer
            )));
        }
    }

    validate_block_work(block, threshold)?;

    signer
        .verify(block.hash().as_bytes(), block.signature())
        .map_err(|_| ValidationError::SignatureFailed)
}

/// Check that attached work meets `threshold` for the block's root.
pub fn validate_block_work(block: &Block, threshold: WorkThreshold) -> Result<(), ValidationError> {
    let work = block.work().ok_or(ValidationError::MissingWork)?;
    let value = work_value(work, &block.work_root());
    if !threshold.is_met_by(value) {
        return Err(ValidationError::InsufficientWork {
            value,
            threshold: threshold.value(),
        });
    }
    Ok(())
}

/// Validate block structure without work or signature checks.
pub fn validate_block_structure(block: &Block) -> Result<(), ValidationError> {
    match block {
        Block::State(b) => {
            // An account's first block has nothing to spend from.
            if b.previous.is_zero() && b.link.is_zero() {
                return Err(ValidationError::StructuralError(
                    "first block requires a source link".into(),
                ));
            }
        }
        Block::Open(b) => {
            if b.source.is_zero() {
                return Err(ValidationError::StructuralError(
                    "open block requires a source".into(),
                ));
            }
        }
        Block::Send(b) => {
            if b.previous.is_zero() {
                return Err(ValidationError::StructuralError(
                    "send block requires previous".into(),
                ));
            }
        }
        Block::Receive(b) => {
            if b.previous.is_zero() {
                return Err(ValidationError::StructuralError(
                    "receive block requires previous".into(),
                ));
            }
            if b.source.is_zero() {
                return Err(ValidationError::StructuralError(
                    "receive block requires a source".into(),
                ));
            }
        }
        Block::Change(b) => {
            if b.previous.is_zero() {
                return Err(ValidationError::StructuralError(
                    "change block requires previous".into(),
                ));
            }
        }
    }
    Ok(())
}
