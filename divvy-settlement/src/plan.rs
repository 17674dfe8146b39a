//! Settlement plan computation
//!
//! Two coexisting algorithms answer "who should pay whom":
//!
//! # Simplified
//!
//! Greedy largest-vs-largest matching over net balances:
//!
//! 1. Partition members into creditors (> 0.01) and debtors (< −0.01)
//! 2. Sort both sides descending by magnitude (stable, so equal
//!    magnitudes keep member-list order)
//! 3. Repeatedly settle `min(largest debtor, largest creditor)` and
//!    advance past anyone whose remainder drops below 0.01
//!
//! ```text
//! Balances:
//!   Alice: +60    Bob: −30    Carol: −30
//!
//! Plan:
//!   Bob   pays Alice 30
//!   Carol pays Alice 30
//! ```
//!
//! The result is deterministic and usually small, but it is a greedy
//! approximation — not a proven minimum transaction count over all debt
//! graphs.
//!
//! # Direct
//!
//! Raw bilateral debts: one instruction per member pair whose pairwise
//! balance exceeds 0.01, sorted descending by amount. Intentionally more
//! transactions than simplified when debts could be netted through the
//! group; the two views are not reconciled into one "true" answer.

use crate::balances::{pairwise_balance, positions};
use crate::types::{PlanMode, SettlementInstruction, SettlementPlan};
use divvy_ledger::{MemberId, Snapshot, BALANCE_EPSILON};
use rust_decimal::Decimal;

/// Compute a settlement plan for the snapshot
///
/// Total over any well-formed snapshot; an already-settled ledger yields
/// an empty plan.
pub fn settlement_plan(snapshot: &Snapshot, mode: PlanMode) -> SettlementPlan {
    let instructions = match mode {
        PlanMode::Simplified => simplified_plan(snapshot),
        PlanMode::Direct => direct_plan(snapshot),
    };
    let total_amount = instructions.iter().map(|i| i.amount).sum();
    SettlementPlan {
        mode,
        instructions,
        total_amount,
    }
}

/// Greedy minimum-ish transaction matching over net balances
fn simplified_plan(snapshot: &Snapshot) -> Vec<SettlementInstruction> {
    // Partition in member-list order; the stable sort below then keeps
    // that order for equal magnitudes, which makes tie-breaking
    // reproducible.
    let mut creditors: Vec<(MemberId, Decimal)> = Vec::new();
    let mut debtors: Vec<(MemberId, Decimal)> = Vec::new();

    for position in positions(snapshot) {
        if position.is_creditor() {
            creditors.push((position.member_id, position.net));
        } else if position.is_debtor() {
            debtors.push((position.member_id, -position.net));
        }
    }

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut instructions = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let settle = debtors[i].1.min(creditors[j].1);

        instructions.push(SettlementInstruction {
            from: debtors[i].0.clone(),
            to: creditors[j].0.clone(),
            amount: settle,
        });

        debtors[i].1 -= settle;
        creditors[j].1 -= settle;

        if debtors[i].1 < BALANCE_EPSILON {
            i += 1;
        }
        if creditors[j].1 < BALANCE_EPSILON {
            j += 1;
        }
    }

    instructions
}

/// Raw bilateral debts for every member pair
fn direct_plan(snapshot: &Snapshot) -> Vec<SettlementInstruction> {
    let mut debts = Vec::new();

    for (i, a) in snapshot.users.iter().enumerate() {
        for b in &snapshot.users[i + 1..] {
            let net = pairwise_balance(snapshot, &a.id, &b.id);
            if net.abs() > BALANCE_EPSILON {
                // Positive net: b owes a.
                let (from, to) = if net < Decimal::ZERO {
                    (a.id.clone(), b.id.clone())
                } else {
                    (b.id.clone(), a.id.clone())
                };
                debts.push(SettlementInstruction {
                    from,
                    to,
                    amount: net.abs(),
                });
            }
        }
    }

    // Stable, so equal amounts keep pair-iteration order.
    debts.sort_by(|x, y| y.amount.cmp(&x.amount));
    debts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use divvy_ledger::{Currency, Member, MemberId, Share, Transaction, TransactionId};

    fn expense(id: &str, amount: i64, payers: &[(&str, i64)], splits: &[(&str, i64)]) -> Transaction {
        Transaction::Expense {
            id: TransactionId::new(id),
            description: format!("expense {}", id),
            amount: Decimal::new(amount, 2),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            payers: payers
                .iter()
                .map(|(u, a)| Share::new(MemberId::new(*u), Decimal::new(*a, 2)))
                .collect(),
            splits: splits
                .iter()
                .map(|(u, a)| Share::new(MemberId::new(*u), Decimal::new(*a, 2)))
                .collect(),
        }
    }

    fn snapshot_with(users: &[(&str, &str)], transactions: Vec<Transaction>) -> Snapshot {
        Snapshot {
            users: users
                .iter()
                .map(|(id, name)| Member::new(MemberId::new(*id), *name))
                .collect(),
            transactions,
            currency: Currency::USD,
        }
    }

    #[test]
    fn test_simplified_equal_split_scenario() {
        // Alice pays 90 split three ways: Bob and Carol each owe 30 and
        // tie-break in member-list order.
        let snapshot = snapshot_with(
            &[("u1", "Alice"), ("u2", "Bob"), ("u3", "Carol")],
            vec![expense(
                "t1",
                9000,
                &[("u1", 9000)],
                &[("u1", 3000), ("u2", 3000), ("u3", 3000)],
            )],
        );

        let plan = settlement_plan(&snapshot, PlanMode::Simplified);
        assert_eq!(plan.instruction_count(), 2);
        assert_eq!(plan.instructions[0].from, MemberId::new("u2"));
        assert_eq!(plan.instructions[0].to, MemberId::new("u1"));
        assert_eq!(plan.instructions[0].amount, Decimal::new(3000, 2));
        assert_eq!(plan.instructions[1].from, MemberId::new("u3"));
        assert_eq!(plan.instructions[1].to, MemberId::new("u1"));
        assert_eq!(plan.instructions[1].amount, Decimal::new(3000, 2));
        assert_eq!(plan.total_amount, Decimal::new(6000, 2));
    }

    #[test]
    fn test_simplified_nets_through_the_group() {
        // A owes B 100, B owes C 80, C owes A 50 — netting leaves
        // A −50, B +20, C +30, settled in two transfers.
        let snapshot = snapshot_with(
            &[("a", "Ann"), ("b", "Ben"), ("c", "Cam")],
            vec![
                expense("t1", 10000, &[("b", 10000)], &[("a", 10000)]),
                expense("t2", 8000, &[("c", 8000)], &[("b", 8000)]),
                expense("t3", 5000, &[("a", 5000)], &[("c", 5000)]),
            ],
        );

        let plan = settlement_plan(&snapshot, PlanMode::Simplified);
        assert_eq!(plan.instruction_count(), 2);
        // Largest creditor is C (+30); the only debtor is A (−50).
        assert_eq!(plan.instructions[0].from, MemberId::new("a"));
        assert_eq!(plan.instructions[0].to, MemberId::new("c"));
        assert_eq!(plan.instructions[0].amount, Decimal::new(3000, 2));
        assert_eq!(plan.instructions[1].from, MemberId::new("a"));
        assert_eq!(plan.instructions[1].to, MemberId::new("b"));
        assert_eq!(plan.instructions[1].amount, Decimal::new(2000, 2));
        assert_eq!(plan.total_amount, Decimal::new(5000, 2));
    }

    #[test]
    fn test_direct_shows_raw_bilateral_debts() {
        // Same cycle as above: direct mode keeps all three debts.
        let snapshot = snapshot_with(
            &[("a", "Ann"), ("b", "Ben"), ("c", "Cam")],
            vec![
                expense("t1", 10000, &[("b", 10000)], &[("a", 10000)]),
                expense("t2", 8000, &[("c", 8000)], &[("b", 8000)]),
                expense("t3", 5000, &[("a", 5000)], &[("c", 5000)]),
            ],
        );

        let plan = settlement_plan(&snapshot, PlanMode::Direct);
        assert_eq!(plan.instruction_count(), 3);
        // Sorted descending by amount: 100, 80, 50.
        assert_eq!(plan.instructions[0].amount, Decimal::new(10000, 2));
        assert_eq!(plan.instructions[0].from, MemberId::new("a"));
        assert_eq!(plan.instructions[0].to, MemberId::new("b"));
        assert_eq!(plan.instructions[1].amount, Decimal::new(8000, 2));
        assert_eq!(plan.instructions[2].amount, Decimal::new(5000, 2));
    }

    #[test]
    fn test_settled_ledger_yields_empty_plan() {
        let snapshot = snapshot_with(&[("u1", "Alice"), ("u2", "Bob")], vec![]);

        for mode in [PlanMode::Simplified, PlanMode::Direct] {
            let plan = settlement_plan(&snapshot, mode);
            assert!(plan.is_settled());
            assert_eq!(plan.total_amount, Decimal::ZERO);
        }
    }

    #[test]
    fn test_dust_balances_are_ignored() {
        // A one-cent imbalance sits exactly at the settled threshold.
        let snapshot = snapshot_with(
            &[("u1", "Alice"), ("u2", "Bob")],
            vec![expense("t1", 1, &[("u1", 1)], &[("u2", 1)])],
        );

        let plan = settlement_plan(&snapshot, PlanMode::Simplified);
        assert!(plan.is_settled());
    }

    #[test]
    fn test_plan_is_deterministic() {
        let snapshot = snapshot_with(
            &[("u1", "Alice"), ("u2", "Bob"), ("u3", "Carol"), ("u4", "Dave")],
            vec![
                expense(
                    "t1",
                    9000,
                    &[("u1", 9000)],
                    &[("u2", 3000), ("u3", 3000), ("u4", 3000)],
                ),
                expense("t2", 4000, &[("u2", 4000)], &[("u3", 4000)]),
            ],
        );

        for mode in [PlanMode::Simplified, PlanMode::Direct] {
            let first = settlement_plan(&snapshot, mode);
            let second = settlement_plan(&snapshot, mode);
            assert_eq!(first, second);
        }
    }
}
