//! Execution module - instruction ordering, plan assembly and transaction
//! composition.

pub mod composer;
pub mod router;

pub use composer::{ComposeTransactionInput, TransactionComposer};
pub use router::{ExecutionPlan, ExecutionRouter, PriorityFeeInjection};
