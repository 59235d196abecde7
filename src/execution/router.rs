//! Execution router - deterministic instruction ordering with explicit
//! priority fee injection.
//!
//! Ordering is purely structural: the router never looks at what a program
//! or account means, only at their encodings.

use crate::types::{AccountMeta, Instruction};
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use tracing::{debug, instrument};

/// Explicit priority fee injection. The caller provides the exact
/// instruction to place first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityFeeInjection {
    /// Instruction that sets priority fee / compute budget preferences.
    pub instruction: Instruction,
}

impl PriorityFeeInjection {
    pub fn new(instruction: Instruction) -> Self {
        Self { instruction }
    }

    /// Compute-budget `SetComputeUnitPrice` instruction with the given price.
    pub fn compute_unit_price(micro_lamports: u64) -> Self {
        Self {
            instruction: ComputeBudgetInstruction::set_compute_unit_price(micro_lamports),
        }
    }
}

/// Input to [`ExecutionRouter::build_plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Base instruction set to execute.
    pub instructions: Vec<Instruction>,
    /// Optional priority fee instruction, injected ahead of everything else.
    pub priority_fee: Option<PriorityFeeInjection>,
}

/// Sort key: (program id base58, payload bytes, rendered account list).
///
/// Payload bytes compare in the same order as their lowercase hex encoding,
/// so the bytes are compared directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OrderingKey {
    program: String,
    data: Vec<u8>,
    accounts: String,
}

impl OrderingKey {
    fn of(instruction: &Instruction) -> Self {
        Self {
            program: instruction.program_id.to_string(),
            data: instruction.data.clone(),
            accounts: render_accounts(&instruction.accounts),
        }
    }
}

/// Renders `address:s|-:w|-` tuples joined with `|`.
fn render_accounts(accounts: &[AccountMeta]) -> String {
    accounts
        .iter()
        .map(|meta| {
            format!(
                "{}:{}:{}",
                meta.pubkey,
                if meta.is_signer { 's' } else { '-' },
                if meta.is_writable { 'w' } else { '-' },
            )
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Orders and assembles instructions into a reproducible plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionRouter;

impl ExecutionRouter {
    pub fn new() -> Self {
        Self
    }

    /// Deterministically orders instructions by (program id, data, accounts).
    ///
    /// The result depends only on instruction content, never on input order.
    #[instrument(skip(self, instructions), fields(count = instructions.len()))]
    pub fn order_deterministically(&self, mut instructions: Vec<Instruction>) -> Vec<Instruction> {
        instructions.sort_by_cached_key(OrderingKey::of);
        debug!("Ordered {} instructions", instructions.len());
        instructions
    }

    /// Builds an execution plan, injecting the priority fee instruction first
    /// when one is supplied. The priority instruction is exempt from ordering.
    #[instrument(
        skip(self, plan),
        fields(count = plan.instructions.len(), priority = plan.priority_fee.is_some())
    )]
    pub fn build_plan(&self, plan: ExecutionPlan) -> Vec<Instruction> {
        let ordered = self.order_deterministically(plan.instructions);

        match plan.priority_fee {
            None => ordered,
            Some(priority) => {
                let mut result = Vec::with_capacity(ordered.len() + 1);
                result.push(priority.instruction);
                result.extend(ordered);
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pubkey;

    fn ix(program_id: Pubkey, data: &[u8], accounts: Vec<AccountMeta>) -> Instruction {
        Instruction {
            program_id,
            accounts,
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_render_accounts() {
        let a = Pubkey::new_from_array([1; 32]);
        let b = Pubkey::new_from_array([2; 32]);
        let rendered =
            render_accounts(&[AccountMeta::new(a, true), AccountMeta::new_readonly(b, false)]);
        assert_eq!(rendered, format!("{}:s:w|{}:-:-", a, b));
        assert_eq!(render_accounts(&[]), "");
    }

    #[test]
    fn test_orders_by_program_then_data_then_accounts() {
        let program = Pubkey::new_from_array([7; 32]);
        let signer = Pubkey::new_from_array([3; 32]);

        let by_accounts_writable = ix(program, &[0x01], vec![AccountMeta::new(signer, false)]);
        let by_accounts_readonly =
            ix(program, &[0x01], vec![AccountMeta::new_readonly(signer, false)]);
        let short_data = ix(program, &[0x01], vec![]);
        let big_data = ix(program, &[0xff], vec![]);

        let router = ExecutionRouter::new();
        let ordered = router.order_deterministically(vec![
            big_data.clone(),
            by_accounts_writable.clone(),
            short_data.clone(),
            by_accounts_readonly.clone(),
        ]);

        // "-:-" sorts before "-:w"; an empty account string sorts first.
        assert_eq!(
            ordered,
            vec![short_data, by_accounts_readonly, by_accounts_writable, big_data]
        );
    }

    #[test]
    fn test_program_compared_as_base58_string() {
        let p1 = Pubkey::new_unique();
        let p2 = Pubkey::new_unique();
        let (first, second) = if p1.to_string() < p2.to_string() { (p1, p2) } else { (p2, p1) };

        let ordered = ExecutionRouter::new()
            .order_deterministically(vec![ix(second, &[], vec![]), ix(first, &[], vec![])]);
        assert_eq!(ordered[0].program_id, first);
        assert_eq!(ordered[1].program_id, second);
    }

    #[test]
    fn test_identical_instructions_do_not_error() {
        let program = Pubkey::new_unique();
        let a = ix(program, &[1, 2, 3], vec![]);
        let ordered = ExecutionRouter::new().order_deterministically(vec![a.clone(), a.clone()]);
        assert_eq!(ordered, vec![a.clone(), a]);
    }

    #[test]
    fn test_build_plan_without_priority() {
        let program = Pubkey::new_unique();
        let plan = ExecutionPlan {
            instructions: vec![ix(program, &[2], vec![]), ix(program, &[1], vec![])],
            priority_fee: None,
        };
        let built = ExecutionRouter::new().build_plan(plan);
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].data, vec![1]);
    }

    #[test]
    fn test_build_plan_priority_exempt_from_sort() {
        let program = Pubkey::new_from_array([9; 32]);
        let priority = PriorityFeeInjection::compute_unit_price(5_000);
        let plan = ExecutionPlan {
            instructions: vec![ix(program, &[2], vec![]), ix(program, &[1], vec![])],
            priority_fee: Some(priority.clone()),
        };

        let built = ExecutionRouter::new().build_plan(plan);
        assert_eq!(built.len(), 3);
        assert_eq!(built[0], priority.instruction);
        assert_eq!(built[1].data, vec![1]);
        assert_eq!(built[2].data, vec![2]);
    }

    #[test]
    fn test_empty_plan_with_priority() {
        let priority = PriorityFeeInjection::compute_unit_price(1);
        let built = ExecutionRouter::new().build_plan(ExecutionPlan {
            instructions: vec![],
            priority_fee: Some(priority.clone()),
        });
        assert_eq!(built, vec![priority.instruction]);
    }
}
