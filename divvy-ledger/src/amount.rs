//! Amount parsing and tolerance policy
//!
//! Two distinct tolerances are in play and must not be conflated:
//! [`ALLOCATION_TOLERANCE`] (0.05) validates form-level payer/split
//! allocations against an expense total, while [`BALANCE_EPSILON`] (0.01)
//! is the engine's threshold for treating a balance as settled.

use crate::types::Share;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

/// Tolerance for payer/split sums against the expense total (input
/// validation)
pub const ALLOCATION_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Threshold below which a balance counts as settled (zero detection)
pub const BALANCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Coerce a raw amount string to a decimal, defaulting to zero
///
/// This is the ledger's lenient numeric policy: unparseable input becomes
/// `0` rather than an error, keeping form-style input forgiving. Callers
/// that need strict parsing should use `Decimal::from_str` directly.
pub fn parse_amount_or_zero(input: &str) -> Decimal {
    let trimmed = input.trim();
    if let Ok(value) = Decimal::from_str(trimmed) {
        return value;
    }
    // Accept scientific notation ("1e2") the way a float parser would.
    if let Ok(value) = Decimal::from_scientific(trimmed) {
        return value;
    }
    Decimal::ZERO
}

/// Check that a share list allocates the full amount
///
/// True when the shares sum to `total` within [`ALLOCATION_TOLERANCE`] and
/// the total is positive.
pub fn is_allocation_balanced(total: Decimal, shares: &[Share]) -> bool {
    let sum: Decimal = shares.iter().map(|s| s.amount).sum();
    (sum - total).abs() < ALLOCATION_TOLERANCE && total > Decimal::ZERO
}

/// Check whether a share list references any member more than once
pub fn has_duplicate_members(shares: &[Share]) -> bool {
    let mut seen = HashSet::new();
    shares.iter().any(|s| !seen.insert(&s.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberId;

    #[test]
    fn test_parse_amount_or_zero() {
        assert_eq!(parse_amount_or_zero("90"), Decimal::new(90, 0));
        assert_eq!(parse_amount_or_zero("12.50"), Decimal::new(1250, 2));
        assert_eq!(parse_amount_or_zero("  3.1  "), Decimal::new(31, 1));
        assert_eq!(parse_amount_or_zero("1e2"), Decimal::new(100, 0));
        assert_eq!(parse_amount_or_zero("-4.20"), Decimal::new(-420, 2));
        assert_eq!(parse_amount_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_amount_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_amount_or_zero("12.5abc"), Decimal::ZERO);
    }

    #[test]
    fn test_allocation_tolerance() {
        let total = Decimal::new(9000, 2); // 90.00
        let shares = |a: i64, b: i64| {
            vec![
                Share::new(MemberId::new("u1"), Decimal::new(a, 2)),
                Share::new(MemberId::new("u2"), Decimal::new(b, 2)),
            ]
        };

        assert!(is_allocation_balanced(total, &shares(4500, 4500)));
        // Off by 0.04 — inside tolerance.
        assert!(is_allocation_balanced(total, &shares(4500, 4496)));
        // Off by 0.05 — the bound is exclusive.
        assert!(!is_allocation_balanced(total, &shares(4500, 4495)));
        // A zero total never validates.
        assert!(!is_allocation_balanced(Decimal::ZERO, &[]));
    }

    #[test]
    fn test_duplicate_members() {
        let shares = vec![
            Share::new(MemberId::new("u1"), Decimal::ONE),
            Share::new(MemberId::new("u2"), Decimal::ONE),
        ];
        assert!(!has_duplicate_members(&shares));

        let dup = vec![
            Share::new(MemberId::new("u1"), Decimal::ONE),
            Share::new(MemberId::new("u1"), Decimal::ONE),
        ];
        assert!(has_duplicate_members(&dup));
    }
}
