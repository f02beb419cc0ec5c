//! Rate and calendar-month utilities shared by the projectors.
//!
//! All annual-to-monthly conversions use simple division (`pct / 100 / 12`),
//! not the compounding-correct geometric root. Every projector in this crate
//! shares that convention; keep them consistent when changing it.

use chrono::{Datelike, NaiveDate};

/// Convert an annual percentage rate to a monthly rate.
///
/// Simple division: `7.0` -> `0.07 / 12`. See module docs.
pub fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / 12.0
}

/// Convert a horizon in years to a month count, clamped to at least 1.
pub fn horizon_months(years: f64) -> u32 {
    (years * 12.0).round().max(1.0) as u32
}

/// Build a month anchor: the first day of the given year/month (UTC month
/// granularity, day-of-month is not significant).
pub fn month_anchor(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).expect("january 1 is valid"))
}

/// Advance a month anchor by `n` months, carrying year rollover.
///
/// The result is pinned to the first of the month.
pub fn advance_months(anchor: NaiveDate, n: u32) -> NaiveDate {
    let total = anchor.year() * 12 + anchor.month0() as i32 + n as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    month_anchor(year, month)
}

/// Standard amortizing payment for a loan.
///
/// `n = max(1, round(term_years * 12))` payments. At a zero or negative rate
/// the payment is a straight principal split `balance / n`; otherwise the
/// annuity formula `balance * r(1+r)^n / ((1+r)^n - 1)`.
pub fn amortized_payment(balance: f64, annual_rate_pct: f64, term_years: f64) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    let n = (term_years * 12.0).round().max(1.0);
    if r <= 0.0 {
        return balance / n;
    }
    let pow = (1.0 + r).powf(n);
    balance * (r * pow) / (pow - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate_is_simple_division() {
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-12);
        assert!((monthly_rate(7.0) - 0.07 / 12.0).abs() < 1e-12);
        assert_eq!(monthly_rate(0.0), 0.0);
        // Negative rates pass through unchanged
        assert!(monthly_rate(-6.0) < 0.0);
    }

    #[test]
    fn test_horizon_clamped_to_one_month() {
        assert_eq!(horizon_months(0.0), 1);
        assert_eq!(horizon_months(-3.0), 1);
        assert_eq!(horizon_months(1.0), 12);
        assert_eq!(horizon_months(20.0), 240);
        // Fractional years round to nearest month
        assert_eq!(horizon_months(1.5), 18);
    }

    #[test]
    fn test_advance_months_year_rollover() {
        let start = month_anchor(2025, 11);
        assert_eq!(advance_months(start, 0), month_anchor(2025, 11));
        assert_eq!(advance_months(start, 1), month_anchor(2025, 12));
        assert_eq!(advance_months(start, 2), month_anchor(2026, 1));
        assert_eq!(advance_months(start, 26), month_anchor(2028, 1));
    }

    #[test]
    fn test_advance_months_pins_day_to_first() {
        let mid_month = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(advance_months(mid_month, 1), month_anchor(2025, 4));
    }

    #[test]
    fn test_amortized_payment_zero_rate() {
        // No interest: straight principal split
        let p = amortized_payment(12_000.0, 0.0, 1.0);
        assert!((p - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_amortized_payment_standard() {
        // 100k at 4% over 30 years: the textbook 477.42/month
        let p = amortized_payment(100_000.0, 4.0, 30.0);
        assert!((p - 477.42).abs() < 0.01, "got {}", p);
    }

    #[test]
    fn test_amortized_payment_minimum_one_payment() {
        let p = amortized_payment(5_000.0, 0.0, 0.0);
        assert!((p - 5_000.0).abs() < 1e-9);
    }
}
