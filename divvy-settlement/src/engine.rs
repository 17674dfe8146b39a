//! Engine facade
//!
//! Ties the ledger store and the balance computations together behind the
//! collaborator contract: UI or CLI layers mutate the store, then read
//! derived values back through this type. No caller performs money math
//! beyond display formatting.

use crate::balances;
use crate::config::Config;
use crate::plan;
use crate::summary;
use crate::types::{LedgerSummary, MemberStatement, PlanMode, SettlementPlan};
use crate::Result;
use divvy_ledger::{snapshot, LedgerStore, MemberId, Snapshot};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Settlement engine
#[derive(Debug)]
pub struct SettlementEngine {
    /// Ledger store
    store: LedgerStore,

    /// Configuration
    config: Config,
}

impl SettlementEngine {
    /// Create an engine, loading the ledger file when it exists
    pub fn new(config: Config) -> Result<Self> {
        let store = if config.ledger_file.exists() {
            LedgerStore::load(&config.ledger_file)?
        } else {
            tracing::info!(
                "No ledger file at {:?}, starting from the default snapshot",
                config.ledger_file
            );
            LedgerStore::new()
        };

        Ok(Self { store, config })
    }

    /// Create an engine around an existing store
    pub fn with_store(store: LedgerStore, config: Config) -> Self {
        Self { store, config }
    }

    /// The underlying store, for mutations
    pub fn store_mut(&mut self) -> &mut LedgerStore {
        &mut self.store
    }

    /// The underlying store, read-only
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    /// Net balance per member (positive = is owed money)
    pub fn net_balances(&self) -> HashMap<MemberId, Decimal> {
        balances::net_balances(self.store.snapshot())
    }

    /// Net amount `b` owes `a`
    pub fn pairwise_balance(&self, a: &MemberId, b: &MemberId) -> Decimal {
        balances::pairwise_balance(self.store.snapshot(), a, b)
    }

    /// Compute a settlement plan in the given mode
    pub fn settlement_plan(&self, mode: PlanMode) -> SettlementPlan {
        let plan = plan::settlement_plan(self.store.snapshot(), mode);
        tracing::info!(
            "Computed {} settlement plan: {} instructions, {} total",
            plan.mode,
            plan.instruction_count(),
            plan.total_amount
        );
        plan
    }

    /// Compute a settlement plan in the configured default mode
    pub fn default_plan(&self) -> SettlementPlan {
        self.settlement_plan(self.config.default_mode)
    }

    /// Per-member statement: balance plus owes/owed-by breakdown
    pub fn member_statement(&self, member_id: &MemberId) -> MemberStatement {
        summary::member_statement(self.store.snapshot(), member_id)
    }

    /// Whole-ledger headline numbers
    pub fn summary(&self) -> LedgerSummary {
        summary::ledger_summary(self.store.snapshot())
    }

    /// Replace the whole ledger from a snapshot document
    ///
    /// Destructive and total: on success the previous state is gone; on
    /// validation failure nothing changes.
    pub fn load_snapshot(&mut self, json: &str) -> Result<()> {
        let imported = snapshot::import(json)?;
        self.store.replace(imported);
        Ok(())
    }

    /// Export the current state as a snapshot document
    pub fn export_snapshot(&self) -> Result<String> {
        Ok(snapshot::to_json(&snapshot::export(self.store.snapshot()))?)
    }

    /// Persist the ledger to the configured file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config.ledger_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.store.save(&self.config.ledger_file)?;
        Ok(())
    }
}
