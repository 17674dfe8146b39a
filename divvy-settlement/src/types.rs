//! Core types for the balance engine

use divvy_ledger::{MemberId, BALANCE_EPSILON};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement plan algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// Greedy largest-vs-largest matching over net balances; aims for few
    /// transactions by netting debts through the group
    Simplified,

    /// Raw bilateral debts for every member pair, without group netting
    Direct,
}

impl PlanMode {
    /// Mode name as used in configuration and display
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanMode::Simplified => "simplified",
            PlanMode::Direct => "direct",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "simplified" => Some(PlanMode::Simplified),
            "direct" => Some(PlanMode::Direct),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One suggested payment in a settlement plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    /// Member who should pay
    pub from: MemberId,

    /// Member who should receive
    pub to: MemberId,

    /// Amount to transfer
    pub amount: Decimal,
}

/// A computed settlement plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Algorithm that produced the plan
    pub mode: PlanMode,

    /// Suggested payments, in plan order
    pub instructions: Vec<SettlementInstruction>,

    /// Sum of all suggested payment amounts
    pub total_amount: Decimal,
}

impl SettlementPlan {
    /// Number of suggested payments
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// True when no payments are needed — everyone is settled up
    pub fn is_settled(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// A member's net position, in member-list order
///
/// Positive net means the member is owed money; negative means the member
/// owes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPosition {
    /// Member ID
    pub member_id: MemberId,

    /// Net balance (positive = creditor, negative = debtor)
    pub net: Decimal,
}

impl MemberPosition {
    /// True when the member is owed more than the settled threshold
    pub fn is_creditor(&self) -> bool {
        self.net > BALANCE_EPSILON
    }

    /// True when the member owes more than the settled threshold
    pub fn is_debtor(&self) -> bool {
        self.net < -BALANCE_EPSILON
    }

    /// Absolute net position
    pub fn magnitude(&self) -> Decimal {
        self.net.abs()
    }
}

/// One line of a member statement: a counterparty and an amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    /// The other member
    pub member_id: MemberId,

    /// Amount owed in the statement's direction (always positive)
    pub amount: Decimal,
}

/// Per-member view of where their balance comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStatement {
    /// Member the statement is for
    pub member_id: MemberId,

    /// Net balance across all transactions
    pub balance: Decimal,

    /// Counterparties this member owes money to
    pub owes: Vec<StatementEntry>,

    /// Counterparties that owe this member money
    pub owed_by: Vec<StatementEntry>,
}

impl MemberStatement {
    /// True when the member has no unsettled pairwise debt
    pub fn is_settled(&self) -> bool {
        self.owes.is_empty() && self.owed_by.is_empty()
    }
}

/// Whole-ledger headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of all expense amounts
    pub total_expenses: Decimal,

    /// All transactions, both kinds
    pub transaction_count: usize,

    /// Expense transactions
    pub expense_count: usize,

    /// Settlement transactions
    pub settlement_count: usize,

    /// Current members
    pub member_count: usize,

    /// Members whose balance is outside the settled threshold
    pub unsettled_count: usize,
}
