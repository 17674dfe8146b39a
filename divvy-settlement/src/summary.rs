//! Member statements and whole-ledger summary

use crate::balances::{net_balances, pairwise_balance};
use crate::types::{LedgerSummary, MemberStatement, StatementEntry};
use divvy_ledger::{MemberId, Snapshot, Transaction, BALANCE_EPSILON};
use rust_decimal::Decimal;

/// Per-member breakdown: net balance plus who they owe and who owes them
///
/// Pairs inside the settled threshold are omitted from both lists.
pub fn member_statement(snapshot: &Snapshot, member_id: &MemberId) -> MemberStatement {
    let balances = net_balances(snapshot);
    let balance = balances.get(member_id).copied().unwrap_or(Decimal::ZERO);

    let mut owes = Vec::new();
    let mut owed_by = Vec::new();

    for other in &snapshot.users {
        if &other.id == member_id {
            continue;
        }
        let net = pairwise_balance(snapshot, member_id, &other.id);
        if net > BALANCE_EPSILON {
            owed_by.push(StatementEntry {
                member_id: other.id.clone(),
                amount: net,
            });
        } else if net < -BALANCE_EPSILON {
            owes.push(StatementEntry {
                member_id: other.id.clone(),
                amount: net.abs(),
            });
        }
    }

    MemberStatement {
        member_id: member_id.clone(),
        balance,
        owes,
        owed_by,
    }
}

/// Headline numbers for the whole ledger
pub fn ledger_summary(snapshot: &Snapshot) -> LedgerSummary {
    let total_expenses = snapshot
        .transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount())
        .sum();
    let unsettled_count = net_balances(snapshot)
        .values()
        .filter(|b| b.abs() > BALANCE_EPSILON)
        .count();

    LedgerSummary {
        total_expenses,
        transaction_count: snapshot.transactions.len(),
        expense_count: snapshot.transactions.iter().filter(|t| t.is_expense()).count(),
        settlement_count: snapshot
            .transactions
            .iter()
            .filter(|t| t.is_settlement())
            .count(),
        member_count: snapshot.users.len(),
        unsettled_count,
    }
}
