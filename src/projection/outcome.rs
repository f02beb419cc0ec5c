//! Projection output structures.
//!
//! Investment and loan projections produce differently-shaped detail payloads
//! but share a common summary surface (final value, total contributed, net
//! return). Downstream reporting pattern-matches on [`ScenarioOutcome`]
//! instead of inspecting optional fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One simulated month: the balance recorded at a month anchor.
///
/// For loan outcomes the `balance` field is not a debt balance but the
/// cumulative benefit of the extra-repayment strategy to date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthPoint {
    pub date: NaiveDate,
    pub balance: f64,
}

/// Result of one investment-account simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentOutcome {
    /// Display label of the account
    pub label: String,

    /// One point per simulated month, chronological
    pub points: Vec<MonthPoint>,

    /// Balance at horizon end, after any deferred tax
    pub final_balance: f64,

    /// Own contributions actually applied (lump + monthly, cap-limited)
    pub total_contributed: f64,

    /// Monthly fees deducted over the horizon
    pub total_fees: f64,

    /// Tax deducted over the horizon (annual or deferred model)
    pub total_tax: f64,

    /// Growth before fees and tax
    pub gross_return: f64,

    /// `final_balance - total_contributed - starting_balance`
    pub net_return: f64,
}

/// One side of the loan comparison for a single month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanSide {
    /// Interest accrued this month
    pub interest: f64,
    /// Outstanding balance after this month's payment
    pub balance: f64,
}

/// Per-month audit row for the baseline vs. extra-repayment comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanMonthRow {
    pub date: NaiveDate,
    pub baseline: LoanSide,
    pub with_extra: LoanSide,
    /// Interest saved this month, after the lost deduction value
    pub saved_after_tax: f64,
}

/// Result of one extra-repayment loan simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOutcome {
    /// Display label of the scenario
    pub label: String,

    /// Cumulative benefit per month: debt-reduction delta plus after-tax
    /// interest saved
    pub points: Vec<MonthPoint>,

    /// Final point value (benefit at horizon)
    pub final_value: f64,

    /// Extra principal actually applied (bounded by outstanding balance)
    pub total_extra_applied: f64,

    /// Cumulative after-tax interest saved at horizon
    pub interest_saved_after_tax: f64,

    /// Defaults to `final_value`; the aggregator overrides this to
    /// `interest_saved_after_tax` under the flow-only reporting setting
    pub net_return: f64,

    /// Detailed per-month comparison for audit/reporting
    pub monthly_rows: Vec<LoanMonthRow>,
}

/// Tagged result of one scenario: an investment account or a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioOutcome {
    Investment(InvestmentOutcome),
    Loan(LoanOutcome),
}

impl ScenarioOutcome {
    pub fn label(&self) -> &str {
        match self {
            ScenarioOutcome::Investment(inv) => &inv.label,
            ScenarioOutcome::Loan(loan) => &loan.label,
        }
    }

    /// Final value at horizon: end balance for investments, cumulative
    /// benefit for loans.
    pub fn final_value(&self) -> f64 {
        match self {
            ScenarioOutcome::Investment(inv) => inv.final_balance,
            ScenarioOutcome::Loan(loan) => loan.final_value,
        }
    }

    /// Own money put in: contributions for investments, extra principal for
    /// loans.
    pub fn total_contributed(&self) -> f64 {
        match self {
            ScenarioOutcome::Investment(inv) => inv.total_contributed,
            ScenarioOutcome::Loan(loan) => loan.total_extra_applied,
        }
    }

    /// Growth before tax and fees for investments; after-tax interest saved
    /// for loans.
    pub fn gross_return(&self) -> f64 {
        match self {
            ScenarioOutcome::Investment(inv) => inv.gross_return,
            ScenarioOutcome::Loan(loan) => loan.interest_saved_after_tax,
        }
    }

    pub fn net_return(&self) -> f64 {
        match self {
            ScenarioOutcome::Investment(inv) => inv.net_return,
            ScenarioOutcome::Loan(loan) => loan.net_return,
        }
    }

    pub fn points(&self) -> &[MonthPoint] {
        match self {
            ScenarioOutcome::Investment(inv) => &inv.points,
            ScenarioOutcome::Loan(loan) => &loan.points,
        }
    }
}
