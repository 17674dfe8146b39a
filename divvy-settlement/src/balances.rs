//! Net and pairwise balance computation
//!
//! Balances are always recomputed from the full transaction history —
//! nothing is cached or incrementally maintained. Recomputation is
//! O(transactions × members) per call, which is cheap at group-ledger
//! scale and removes a whole class of incremental-update bugs.
//!
//! All functions here are total over a well-formed snapshot: unknown
//! member references and malformed allocations degrade to whatever the
//! arithmetic yields, they never error.

use crate::types::MemberPosition;
use divvy_ledger::{MemberId, Share, Snapshot, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Net balance per member
///
/// Sign convention: positive = net creditor (is owed money), negative =
/// net debtor. Expenses credit each payer with what they paid and debit
/// each split member with what they owe; settlements credit `from` and
/// debit `to` (paying down a debt raises the payer's balance).
///
/// Only current members get a balance slot. A transaction referencing a
/// removed member contributes nothing for that member — the money simply
/// stops being counted once the member is gone. This mirrors the
/// keep-history-after-deletion policy and is intentional, not a bug.
pub fn net_balances(snapshot: &Snapshot) -> HashMap<MemberId, Decimal> {
    let mut balances: HashMap<MemberId, Decimal> = snapshot
        .users
        .iter()
        .map(|u| (u.id.clone(), Decimal::ZERO))
        .collect();

    for tx in &snapshot.transactions {
        match tx {
            Transaction::Expense { payers, splits, .. } => {
                for share in payers {
                    if let Some(balance) = balances.get_mut(&share.user_id) {
                        *balance += share.amount;
                    }
                }
                for share in splits {
                    if let Some(balance) = balances.get_mut(&share.user_id) {
                        *balance -= share.amount;
                    }
                }
            }
            Transaction::Settlement {
                from, to, amount, ..
            } => {
                if let Some(balance) = balances.get_mut(from) {
                    *balance += *amount;
                }
                if let Some(balance) = balances.get_mut(to) {
                    *balance -= *amount;
                }
            }
        }
    }

    balances
}

/// Net positions in member-list order
///
/// Same numbers as [`net_balances`], shaped for display and for the
/// settlement plan: the stable member-list order is what makes plan
/// tie-breaking reproducible.
pub fn positions(snapshot: &Snapshot) -> Vec<MemberPosition> {
    let balances = net_balances(snapshot);
    snapshot
        .users
        .iter()
        .map(|u| MemberPosition {
            member_id: u.id.clone(),
            net: balances.get(&u.id).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

fn share_amount(shares: &[Share], member: &MemberId) -> Decimal {
    shares
        .iter()
        .find(|s| &s.user_id == member)
        .map(|s| s.amount)
        .unwrap_or(Decimal::ZERO)
}

/// Net amount `b` owes `a` (negative when reversed)
///
/// Computed independently of [`net_balances`] by replaying the history
/// filtered to this pair. A multi-payer expense is apportioned by each
/// payer's share of the total payment: `a` effectively lent
/// `(a_paid / amount) × b_owed` to `b`, and symmetrically. Direct
/// settlements between the two count in full.
///
/// Running this for all pairs is O(members² × transactions); fine at
/// group scale, worth knowing about before pointing it at anything big.
pub fn pairwise_balance(snapshot: &Snapshot, a: &MemberId, b: &MemberId) -> Decimal {
    let mut net = Decimal::ZERO;

    for tx in &snapshot.transactions {
        match tx {
            Transaction::Expense {
                amount,
                payers,
                splits,
                ..
            } => {
                // A zero-amount expense cannot be apportioned; skip it
                // rather than divide by zero.
                if amount.is_zero() {
                    continue;
                }
                let a_paid = share_amount(payers, a);
                let a_owes = share_amount(splits, a);
                let b_paid = share_amount(payers, b);
                let b_owes = share_amount(splits, b);

                if a_paid > Decimal::ZERO && b_owes > Decimal::ZERO {
                    net += a_paid / *amount * b_owes;
                }
                if b_paid > Decimal::ZERO && a_owes > Decimal::ZERO {
                    net -= b_paid / *amount * a_owes;
                }
            }
            Transaction::Settlement {
                from, to, amount, ..
            } => {
                if from == a && to == b {
                    net += *amount;
                }
                if from == b && to == a {
                    net -= *amount;
                }
            }
        }
    }

    net
}
