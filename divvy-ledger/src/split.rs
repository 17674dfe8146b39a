//! Split allocation helpers
//!
//! Compute the `splits` share list for an expense before it reaches the
//! store. Three allocation strategies are supported, matching the expense
//! entry flow: equal shares, weighted shares, and exact amounts with the
//! remainder spread over unspecified members.

use crate::types::{MemberId, Share};
use rust_decimal::Decimal;

/// Split an amount equally among the given members
///
/// Returns one share per member of `amount / n`. Empty member list yields
/// no shares.
pub fn equal_split(amount: Decimal, members: &[MemberId]) -> Vec<Share> {
    if members.is_empty() {
        return Vec::new();
    }
    let per_member = amount / Decimal::from(members.len() as u64);
    members
        .iter()
        .map(|id| Share::new(id.clone(), per_member))
        .collect()
}

/// Split an amount proportionally to per-member weights
///
/// Each member receives `amount * weight / total_weight`. A zero or
/// negative total weight yields no shares.
pub fn weighted_split(amount: Decimal, weights: &[(MemberId, Decimal)]) -> Vec<Share> {
    let total_weight: Decimal = weights.iter().map(|(_, w)| *w).sum();
    if total_weight <= Decimal::ZERO {
        return Vec::new();
    }
    weights
        .iter()
        .map(|(id, weight)| Share::new(id.clone(), amount * *weight / total_weight))
        .collect()
}

/// Split an amount with fixed per-member entries plus an equal remainder
///
/// `fixed` entries are kept verbatim; whatever remains of `amount` is
/// divided equally among `auto_members`. With no auto members the fixed
/// entries stand alone (and may not sum to the total — allocation
/// validation is the caller's concern).
pub fn exact_split(
    amount: Decimal,
    fixed: &[(MemberId, Decimal)],
    auto_members: &[MemberId],
) -> Vec<Share> {
    let fixed_total: Decimal = fixed.iter().map(|(_, a)| *a).sum();
    let per_auto = if auto_members.is_empty() {
        Decimal::ZERO
    } else {
        (amount - fixed_total) / Decimal::from(auto_members.len() as u64)
    };

    let mut shares: Vec<Share> = fixed
        .iter()
        .map(|(id, a)| Share::new(id.clone(), *a))
        .collect();
    shares.extend(
        auto_members
            .iter()
            .map(|id| Share::new(id.clone(), per_auto)),
    );
    shares
}
