//! In-memory ledger store
//!
//! The store owns the authoritative [`Snapshot`] and applies every mutation
//! synchronously — single actor, whole-state semantics, no caching of
//! derived values. Balances are always recomputed from the full history by
//! the settlement crate, which keeps the store free of incremental-update
//! bookkeeping.
//!
//! Validation here is deliberately thin: required fields must be present,
//! but allocation sums are not checked (that is the form-level
//! [`is_allocation_balanced`](crate::amount::is_allocation_balanced)
//! concern) and amounts coerce through the lenient
//! [`parse_amount_or_zero`](crate::amount::parse_amount_or_zero) policy.

use crate::amount::parse_amount_or_zero;
use crate::snapshot::{self, Snapshot};
use crate::types::{Currency, Member, MemberId, Share, Transaction, TransactionId};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use uuid::Uuid;

/// Name resolved for member ids no longer in the member set
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown";

/// Owning store for one ledger
#[derive(Debug, Default)]
pub struct LedgerStore {
    snapshot: Snapshot,
}

impl LedgerStore {
    /// Create a store with the starter snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an existing snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a store from a snapshot document file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let snapshot = snapshot::import(&contents)?;
        tracing::info!(
            "Loaded ledger from {:?}: {} members, {} transactions",
            path.as_ref(),
            snapshot.users.len(),
            snapshot.transactions.len()
        );
        Ok(Self { snapshot })
    }

    /// Write the snapshot document to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = snapshot::to_json(&snapshot::export(&self.snapshot))?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!("Saved ledger to {:?}", path.as_ref());
        Ok(())
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the entire snapshot (destructive import)
    ///
    /// Callers are expected to have confirmed the replacement with the
    /// user; there is no merge.
    pub fn replace(&mut self, snapshot: Snapshot) {
        tracing::info!(
            "Replacing ledger state: {} members, {} transactions",
            snapshot.users.len(),
            snapshot.transactions.len()
        );
        self.snapshot = snapshot;
    }

    // Members

    /// Current member set
    pub fn members(&self) -> &[Member] {
        &self.snapshot.users
    }

    /// Look up a member by id
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.snapshot.users.iter().find(|m| &m.id == id)
    }

    /// Resolve a member name, with a sentinel for stale ids
    ///
    /// Transactions outlive the members they reference, so a lookup of a
    /// removed member must resolve to [`UNKNOWN_MEMBER_NAME`], never fail.
    pub fn member_name(&self, id: &MemberId) -> &str {
        self.member(id)
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_MEMBER_NAME)
    }

    /// Add a member with a fresh id
    pub fn add_member(&mut self, name: &str) -> Result<MemberId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation(
                "member name must not be empty".to_string(),
            ));
        }
        let id = MemberId::new(Self::next_id());
        self.snapshot.users.push(Member::new(id.clone(), name));
        tracing::debug!("Added member {} ({})", name, id);
        Ok(id)
    }

    /// Remove a member from the member set
    ///
    /// Transactions are kept as historical record; only the member entry
    /// goes away. Returns false when the id was not present.
    pub fn remove_member(&mut self, id: &MemberId) -> bool {
        let before = self.snapshot.users.len();
        self.snapshot.users.retain(|m| &m.id != id);
        let removed = self.snapshot.users.len() != before;
        if removed {
            tracing::debug!("Removed member {}", id);
        }
        removed
    }

    // Transactions

    /// Full transaction history, in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.snapshot.transactions
    }

    /// Look up a transaction by id
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.snapshot.transactions.iter().find(|t| t.id() == id)
    }

    /// Record an expense
    ///
    /// The raw amount string coerces through the lenient policy; payer and
    /// split allocations are stored as given.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: &str,
        date: DateTime<Utc>,
        payers: Vec<Share>,
        splits: Vec<Share>,
    ) -> Result<TransactionId> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "expense description must not be empty".to_string(),
            ));
        }
        let id = TransactionId::new(Self::next_id());
        self.snapshot.transactions.push(Transaction::Expense {
            id: id.clone(),
            description: description.to_string(),
            amount: parse_amount_or_zero(amount),
            date,
            payers,
            splits,
        });
        tracing::debug!("Added expense {}", id);
        Ok(id)
    }

    /// Replace an existing transaction with an updated expense
    ///
    /// The id is preserved; everything else is taken from the arguments.
    pub fn update_expense(
        &mut self,
        id: &TransactionId,
        description: &str,
        amount: &str,
        date: DateTime<Utc>,
        payers: Vec<Share>,
        splits: Vec<Share>,
    ) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "expense description must not be empty".to_string(),
            ));
        }
        let slot = self
            .snapshot
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))?;
        *slot = Transaction::Expense {
            id: id.clone(),
            description: description.to_string(),
            amount: parse_amount_or_zero(amount),
            date,
            payers,
            splits,
        };
        Ok(())
    }

    /// Record a direct settlement between two members
    pub fn add_settlement(
        &mut self,
        from: MemberId,
        to: MemberId,
        amount: &str,
        date: DateTime<Utc>,
    ) -> Result<TransactionId> {
        if from == to {
            return Err(Error::Validation(
                "settlement payer and receiver must differ".to_string(),
            ));
        }
        let id = TransactionId::new(Self::next_id());
        self.snapshot.transactions.push(Transaction::Settlement {
            id: id.clone(),
            description: "Settlement".to_string(),
            amount: parse_amount_or_zero(amount),
            date,
            from,
            to,
        });
        tracing::debug!("Added settlement {}", id);
        Ok(id)
    }

    /// Replace an existing transaction with an updated settlement
    pub fn update_settlement(
        &mut self,
        id: &TransactionId,
        from: MemberId,
        to: MemberId,
        amount: &str,
        date: DateTime<Utc>,
    ) -> Result<()> {
        if from == to {
            return Err(Error::Validation(
                "settlement payer and receiver must differ".to_string(),
            ));
        }
        let slot = self
            .snapshot
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_string()))?;
        *slot = Transaction::Settlement {
            id: id.clone(),
            description: "Settlement".to_string(),
            amount: parse_amount_or_zero(amount),
            date,
            from,
            to,
        };
        Ok(())
    }

    /// Delete a transaction. Returns false when the id was not present.
    pub fn remove_transaction(&mut self, id: &TransactionId) -> bool {
        let before = self.snapshot.transactions.len();
        self.snapshot.transactions.retain(|t| t.id() != id);
        self.snapshot.transactions.len() != before
    }

    // Currency

    /// Active currency
    pub fn currency(&self) -> Currency {
        self.snapshot.currency
    }

    /// Set the active currency from a code string
    ///
    /// Codes outside the recognized set are rejected and the state is left
    /// unchanged.
    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        match Currency::parse(code) {
            Some(currency) => {
                self.snapshot.currency = currency;
                Ok(())
            }
            None => Err(Error::UnknownCurrency(code.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date() -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_member_assigns_unique_ids() {
        let mut store = LedgerStore::from_snapshot(Snapshot::empty(Currency::USD));
        let a = store.add_member("Carol").unwrap();
        let b = store.add_member("Carol").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.members().len(), 2);
    }

    #[test]
    fn test_add_member_requires_name() {
        let mut store = LedgerStore::new();
        assert!(store.add_member("   ").is_err());
    }

    #[test]
    fn test_remove_member_keeps_transactions() {
        let mut store = LedgerStore::new();
        let alice = store.members()[0].id.clone();
        let bob = store.members()[1].id.clone();
        store
            .add_settlement(alice.clone(), bob.clone(), "20", date())
            .unwrap();

        assert!(store.remove_member(&bob));
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.member_name(&bob), UNKNOWN_MEMBER_NAME);
        assert_eq!(store.member_name(&alice), "Alice");
    }

    #[test]
    fn test_lenient_amount_coercion() {
        let mut store = LedgerStore::new();
        let id = store
            .add_expense("Dinner", "not a number", date(), vec![], vec![])
            .unwrap();
        assert_eq!(store.transaction(&id).unwrap().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_self_settlement_rejected() {
        let mut store = LedgerStore::new();
        let alice = store.members()[0].id.clone();
        let err = store
            .add_settlement(alice.clone(), alice, "20", date())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn test_update_preserves_id() {
        let mut store = LedgerStore::new();
        let alice = store.members()[0].id.clone();
        let id = store
            .add_expense(
                "Lunch",
                "30",
                date(),
                vec![Share::new(alice.clone(), Decimal::new(30, 0))],
                vec![Share::new(alice.clone(), Decimal::new(30, 0))],
            )
            .unwrap();

        store
            .update_expense(&id, "Brunch", "45", date(), vec![], vec![])
            .unwrap();

        let tx = store.transaction(&id).unwrap();
        assert_eq!(tx.id(), &id);
        assert_eq!(tx.description(), "Brunch");
        assert_eq!(tx.amount(), Decimal::new(45, 0));
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn test_update_missing_transaction() {
        let mut store = LedgerStore::new();
        let err = store
            .update_expense(&TransactionId::new("nope"), "x", "1", date(), vec![], vec![])
            .unwrap_err();
        assert!(matches!(err, Error::TransactionNotFound(_)));
    }

    #[test]
    fn test_set_currency() {
        let mut store = LedgerStore::new();
        store.set_currency("JPY").unwrap();
        assert_eq!(store.currency(), Currency::JPY);

        let err = store.set_currency("DOGE").unwrap_err();
        assert!(matches!(err, Error::UnknownCurrency(_)));
        assert_eq!(store.currency(), Currency::JPY);
    }

    #[test]
    fn test_remove_transaction() {
        let mut store = LedgerStore::new();
        let id = store
            .add_expense("Coffee", "4.50", date(), vec![], vec![])
            .unwrap();
        assert!(store.remove_transaction(&id));
        assert!(!store.remove_transaction(&id));
        assert!(store.transactions().is_empty());
    }
}
