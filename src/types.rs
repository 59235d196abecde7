//! Core types shared across the Threeium SDK.

pub use solana_sdk::clock::Slot;
pub use solana_sdk::commitment_config::CommitmentConfig;
pub use solana_sdk::instruction::{AccountMeta, Instruction};
pub use solana_sdk::pubkey::Pubkey;

/// Lamport amounts in ledger sums. Signed and wider than any on-chain balance.
pub type Lamports = i128;
