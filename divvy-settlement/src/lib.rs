//! Divvy Settlement Engine
//!
//! The balance engine for the group-expense ledger: net balances, pairwise
//! debts, and settlement plans derived from a ledger snapshot.
//!
//! # Architecture
//!
//! - **Pure recomputation**: every derived value is recomputed from the
//!   full transaction history on each call; nothing is cached
//! - **Total operations**: engine functions never fail over a well-formed
//!   snapshot — malformed input degrades numerically instead of erroring
//! - **Two plan modes**: `simplified` (greedy netting through the group)
//!   and `direct` (raw bilateral debts) coexist, unreconciled
//!
//! # Example
//!
//! ```
//! use divvy_settlement::{Config, PlanMode, SettlementEngine};
//! use divvy_ledger::LedgerStore;
//!
//! let engine = SettlementEngine::with_store(LedgerStore::new(), Config::default());
//! let plan = engine.settlement_plan(PlanMode::Simplified);
//! assert!(plan.is_settled());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod balances;
pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod summary;
pub mod types;

// Re-exports
pub use balances::{net_balances, pairwise_balance, positions};
pub use config::Config;
pub use engine::SettlementEngine;
pub use error::{Error, Result};
pub use plan::settlement_plan;
pub use summary::{ledger_summary, member_statement};
pub use types::{
    LedgerSummary, MemberPosition, MemberStatement, PlanMode, SettlementInstruction,
    SettlementPlan, StatementEntry,
};
