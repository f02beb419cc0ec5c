//! Policy constants for the capped share-savings account and share income
//! taxation.
//!
//! Edit these when the yearly rules change.

/// Tax rate on the capped share-savings account (mark-to-market), percent
pub const CAPPED_ACCOUNT_TAX_PCT: f64 = 17.0;

/// Share income below this threshold is taxed at the low rate
pub const SHARE_INCOME_BRACKET_THRESHOLD: f64 = 67_500.0;

/// Tax rate on share income up to the bracket threshold
pub const SHARE_INCOME_LOW_RATE: f64 = 0.27;

/// Tax rate on share income above the bracket threshold
pub const SHARE_INCOME_HIGH_RATE: f64 = 0.42;

/// Deposit ceiling on the capped share-savings account for a calendar year.
///
/// Returns None for years without a published cap.
pub fn contribution_cap_for_year(year: i32) -> Option<f64> {
    match year {
        2025 => Some(166_200.0),
        2026 => Some(174_200.0),
        _ => None,
    }
}

/// Remaining deposit capacity for a year, given the account's closing value
/// at the end of the previous year.
pub fn remaining_capacity(year: i32, closing_balance_prev_year_end: f64) -> f64 {
    let cap = contribution_cap_for_year(year).unwrap_or(0.0);
    (cap - closing_balance_prev_year_end).max(0.0)
}

/// Two-band tax on share income outside the capped account.
pub fn share_income_tax(taxable: f64) -> f64 {
    let v = taxable.max(0.0);
    if v <= SHARE_INCOME_BRACKET_THRESHOLD {
        return v * SHARE_INCOME_LOW_RATE;
    }
    let first = SHARE_INCOME_BRACKET_THRESHOLD * SHARE_INCOME_LOW_RATE;
    first + (v - SHARE_INCOME_BRACKET_THRESHOLD) * SHARE_INCOME_HIGH_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_table() {
        assert_eq!(contribution_cap_for_year(2025), Some(166_200.0));
        assert_eq!(contribution_cap_for_year(2026), Some(174_200.0));
        assert_eq!(contribution_cap_for_year(2020), None);
    }

    #[test]
    fn test_remaining_capacity() {
        assert_eq!(remaining_capacity(2026, 0.0), 174_200.0);
        assert_eq!(remaining_capacity(2026, 100_000.0), 74_200.0);
        // Closing balance above the cap leaves no room
        assert_eq!(remaining_capacity(2026, 200_000.0), 0.0);
        // Unknown year has no cap published
        assert_eq!(remaining_capacity(2020, 0.0), 0.0);
    }

    #[test]
    fn test_share_income_tax_brackets() {
        assert_eq!(share_income_tax(0.0), 0.0);
        assert!((share_income_tax(10_000.0) - 2_700.0).abs() < 1e-9);
        // Exactly at the threshold: low rate throughout
        assert!((share_income_tax(67_500.0) - 67_500.0 * 0.27).abs() < 1e-9);
        // Above the threshold: marginal high rate on the excess
        let expected = 67_500.0 * 0.27 + 32_500.0 * 0.42;
        assert!((share_income_tax(100_000.0) - expected).abs() < 1e-9);
    }
}
