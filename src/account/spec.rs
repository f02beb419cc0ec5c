//! Scenario input records and documented numeric defaults.
//!
//! All fields are assumed pre-validated as finite numbers by the producing
//! collaborator (CLI parsing, export prefill). Missing inputs are coerced to
//! the defaults below before a spec reaches the projectors, so the projectors
//! themselves never reject an input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default annual return assumption when none is supplied
pub const DEFAULT_ANNUAL_RETURN_PCT: f64 = 7.0;

/// Default projection horizon
pub const DEFAULT_HORIZON_YEARS: f64 = 20.0;

/// Default discretionary monthly allocation
pub const DEFAULT_MONTHLY_ALLOCATION: f64 = 3_000.0;

/// Default annual fee on the capped share-savings account
pub const DEFAULT_CAPPED_FEE_PCT: f64 = 0.4;

/// Default annual fee on the taxable account
pub const DEFAULT_TAXABLE_FEE_PCT: f64 = 0.2;

/// Default tax rate on the taxable account
pub const DEFAULT_TAXABLE_TAX_PCT: f64 = 27.0;

/// Default value of the mortgage-interest tax deduction lost when interest
/// is no longer paid
pub const DEFAULT_INTEREST_DEDUCTION_PCT: f64 = 26.0;

/// Default remaining loan term when no estimate is available
pub const DEFAULT_LOAN_TERM_YEARS: f64 = 20.0;

/// When tax on investment gains is realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxModel {
    /// Mark-to-market: unrealized gain is taxed at each 12-month boundary
    Annual,
    /// Total accumulated gain is taxed once at horizon end
    Deferred,
}

/// Input for one investment-account simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSpec {
    /// Display label of the account
    pub label: String,

    /// Opening balance, non-negative
    pub starting_balance: f64,

    /// Recurring contribution per month
    pub monthly_contribution: f64,

    /// One-time contribution applied before month 1
    pub lump_sum: f64,

    /// Number of months to simulate (at least 1)
    pub horizon_months: u32,

    /// Month anchor of the first simulated month
    pub start_date: NaiveDate,

    /// Annual return, percent (may be negative)
    pub annual_return_pct: f64,

    /// Annual fee, percent, deducted monthly from the balance
    pub annual_fee_pct: f64,

    /// Tax rate applied under the chosen tax model, percent
    pub annual_tax_pct: f64,

    /// Tax timing regime
    pub tax_model: TaxModel,

    /// Lifetime deposit ceiling across lump and monthly contributions.
    /// None = unbounded.
    pub contribution_cap: Option<f64>,
}

/// Input for one extra-repayment loan simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSpec {
    /// Display label of the scenario
    pub label: String,

    /// Outstanding principal at the start of the comparison
    pub opening_balance: f64,

    /// Annual interest rate, percent
    pub annual_rate_pct: f64,

    /// Remaining contractual term in years (used to derive the fixed payment)
    pub term_years: f64,

    /// Explicit fixed monthly payment; when None (or not positive) the
    /// standard amortizing payment is computed from balance/rate/term
    pub payment_override: Option<f64>,

    /// Extra principal paid every month on top of the fixed payment
    pub extra_monthly: f64,

    /// Extra principal paid once, in the first month
    pub extra_lump: f64,

    /// Number of months to simulate (at least 1)
    pub horizon_months: u32,

    /// Month anchor of the first simulated month
    pub start_date: NaiveDate,

    /// Share of interest cost recovered through the tax deduction, percent.
    /// Interest saved by prepaying loses this deduction value.
    pub interest_deduction_pct: f64,
}

impl LoanSpec {
    /// The fixed monthly payment used for both trajectories.
    pub fn fixed_payment(&self) -> f64 {
        match self.payment_override {
            Some(p) if p > 0.0 => p,
            _ => crate::projection::rate::amortized_payment(
                self.opening_balance,
                self.annual_rate_pct,
                self.term_years,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::rate::month_anchor;

    fn base_loan() -> LoanSpec {
        LoanSpec {
            label: "test".to_string(),
            opening_balance: 100_000.0,
            annual_rate_pct: 4.0,
            term_years: 30.0,
            payment_override: None,
            extra_monthly: 0.0,
            extra_lump: 0.0,
            horizon_months: 12,
            start_date: month_anchor(2025, 1),
            interest_deduction_pct: 26.0,
        }
    }

    #[test]
    fn test_fixed_payment_falls_back_to_amortized() {
        let spec = base_loan();
        assert!((spec.fixed_payment() - 477.42).abs() < 0.01);
    }

    #[test]
    fn test_fixed_payment_override() {
        let mut spec = base_loan();
        spec.payment_override = Some(600.0);
        assert_eq!(spec.fixed_payment(), 600.0);

        // A non-positive override is ignored
        spec.payment_override = Some(0.0);
        assert!((spec.fixed_payment() - 477.42).abs() < 0.01);
    }
}
