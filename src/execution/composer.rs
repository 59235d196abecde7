//! Transaction composer.
//!
//! Builds unsigned v0 versioned transactions from explicit inputs: fee payer,
//! recent blockhash and instruction list are never chosen implicitly, and no
//! instruction is inserted.

use crate::error::{require_non_empty, ErrorCode, Result, ThreeiumError};
use crate::types::{Instruction, Pubkey};
use solana_sdk::hash::Hash;
use solana_sdk::message::{v0::Message as MessageV0, VersionedMessage};
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Inputs to [`TransactionComposer::compose_v0`].
#[derive(Debug, Clone)]
pub struct ComposeTransactionInput {
    /// Fee payer public key.
    pub fee_payer: Pubkey,
    /// Recent blockhash, base58.
    pub recent_blockhash: String,
    /// Instructions, used in the given order.
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionComposer;

impl TransactionComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose a v0 versioned transaction. Signature slots are left empty.
    #[instrument(
        skip(self, input),
        fields(fee_payer = %input.fee_payer, count = input.instructions.len())
    )]
    pub fn compose_v0(&self, input: &ComposeTransactionInput) -> Result<VersionedTransaction> {
        require_non_empty(
            &input.recent_blockhash,
            ErrorCode::BlockhashRequired,
            "recentBlockhash is required",
        )?;

        let blockhash = Hash::from_str(&input.recent_blockhash).map_err(|e| {
            ThreeiumError::invalid_input(
                ErrorCode::BlockhashInvalid,
                "recentBlockhash is not a valid hash",
            )
            .with_detail("recentBlockhash", input.recent_blockhash.as_str())
            .with_detail("reason", e.to_string())
        })?;

        let message = MessageV0::try_compile(&input.fee_payer, &input.instructions, &[], blockhash)
            .map_err(|e| {
                ThreeiumError::collaborator(
                    ErrorCode::ComposeFailed,
                    "failed to compile v0 message",
                    anyhow::Error::new(e),
                )
                .with_detail("feePayer", input.fee_payer.to_string())
            })?;

        let required_signatures = message.header.num_required_signatures as usize;
        debug!("Compiled v0 message requiring {} signatures", required_signatures);

        Ok(VersionedTransaction {
            signatures: vec![Signature::default(); required_signatures],
            message: VersionedMessage::V0(message),
        })
    }
}
