//! Account-export ingestion and the loan-prefill heuristic.
//!
//! Bank and mortgage CSV exports supply the raw balances and transaction
//! history used to prefill a loan scenario: a best-effort estimate of the
//! effective interest rate, the current monthly payment, and the remaining
//! term. The simulation core is unaffected by whether these estimates are
//! present; missing data falls back silently to the documented defaults.

use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::Reader;
use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::settings::LoanTarget;

/// Description marker identifying interest rows in a bank-loan export
const INTEREST_MARKER: &str = "interest";

/// Sanity ceiling on an estimated bank-loan rate, percent
const MAX_BANK_RATE_PCT: f64 = 25.0;

/// Sanity ceiling on an estimated mortgage rate, percent
const MAX_MORTGAGE_RATE_PCT: f64 = 20.0;

const MIN_TERM_YEARS: f64 = 0.1;
const MAX_TERM_YEARS: f64 = 50.0;

/// One row of a bank-loan account export.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
    /// Signed amount; outflows are negative
    #[serde(rename = "Amount")]
    pub amount: f64,
    /// Account balance after the transaction (negative while in debt)
    #[serde(rename = "Balance")]
    pub balance: f64,
}

/// One term row of a mortgage amortization export.
#[derive(Debug, Clone, Deserialize)]
pub struct AmortizationTerm {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Principal repaid this term
    #[serde(rename = "Principal")]
    pub principal: f64,
    /// Interest charged this term
    #[serde(rename = "Interest")]
    pub interest: f64,
    /// Lender margin charged this term
    #[serde(rename = "Margin")]
    pub margin: f64,
    /// Outstanding debt after this term
    #[serde(rename = "RemainingDebt")]
    pub remaining_debt: f64,
}

/// Best-guess loan scenario inputs derived from an export.
///
/// Every field is optional: the caller fills whatever is missing from the
/// documented defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoanEstimate {
    pub balance: Option<f64>,
    pub annual_rate_pct: Option<f64>,
    pub payment: Option<f64>,
    pub term_years: Option<f64>,
}

impl LoanEstimate {
    /// Whether the export showed any outstanding debt.
    pub fn has_debt(&self) -> bool {
        self.balance.unwrap_or(0.0) > 0.0
    }
}

/// Load bank-loan transactions from a CSV export file.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>> {
    load_transactions_from_reader(std::fs::File::open(path.as_ref())?)
}

/// Load bank-loan transactions from any reader (string buffer, stream).
pub fn load_transactions_from_reader<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Load mortgage amortization terms from a CSV export file.
pub fn load_amortization<P: AsRef<Path>>(path: P) -> Result<Vec<AmortizationTerm>> {
    load_amortization_from_reader(std::fs::File::open(path.as_ref())?)
}

/// Load mortgage amortization terms from any reader.
pub fn load_amortization_from_reader<R: Read>(reader: R) -> Result<Vec<AmortizationTerm>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut terms = Vec::new();
    for result in csv_reader.deserialize() {
        terms.push(result?);
    }
    Ok(terms)
}

/// Estimate loan inputs from a bank-loan transaction history.
///
/// Looks at the calendar month of the latest transaction on or before
/// `today`: total outflow approximates the monthly payment, interest rows
/// (matched by description) against the current debt give an effective
/// annual rate, and the annuity formula inverted for `n` gives the
/// remaining term.
pub fn estimate_from_transactions(
    transactions: &[TransactionRecord],
    today: NaiveDate,
) -> Option<LoanEstimate> {
    let past: Vec<&TransactionRecord> =
        transactions.iter().filter(|t| t.date <= today).collect();
    let last = *past.last()?;

    let (year, month) = (last.date.year(), last.date.month());
    let month_txs: Vec<&&TransactionRecord> = past
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .collect();

    let outflow: f64 = month_txs
        .iter()
        .filter(|t| t.amount < 0.0)
        .map(|t| t.amount.abs())
        .sum();
    let interest: f64 = month_txs
        .iter()
        .filter(|t| t.description.to_lowercase().contains(INTEREST_MARKER))
        .map(|t| t.amount.abs())
        .sum();

    let debt = last.balance.abs();

    let annual_rate_pct = if debt > 0.0 && interest > 0.0 {
        let pct = (interest / debt * 12.0 * 100.0).clamp(0.0, MAX_BANK_RATE_PCT);
        Some((pct * 10.0).round() / 10.0)
    } else {
        None
    };

    let payment = if outflow > 0.0 {
        Some(outflow.round())
    } else {
        None
    };

    // Remaining term from the annuity formula, when the payment actually
    // covers the interest
    let term_years = annual_rate_pct.and_then(|pct| {
        let monthly = pct / 100.0 / 12.0;
        if monthly > 0.0 && outflow > debt * monthly {
            let n = (outflow / (outflow - monthly * debt)).ln() / (1.0 + monthly).ln();
            Some((n / 12.0).clamp(MIN_TERM_YEARS, MAX_TERM_YEARS).round())
        } else {
            None
        }
    });

    debug!(
        "bank-loan estimate: debt={:.0} rate={:?} payment={:?} term={:?}",
        debt, annual_rate_pct, payment, term_years
    );

    Some(LoanEstimate {
        balance: if debt > 0.0 { Some(debt.round()) } else { None },
        annual_rate_pct,
        payment,
        term_years,
    })
}

/// Estimate loan inputs from a mortgage amortization schedule.
///
/// Uses the latest term on or before `today`: interest plus margin against
/// the remaining debt gives the effective rate, principal plus interest the
/// payment, and debt over the principal run-rate the remaining term.
pub fn estimate_from_amortization(
    terms: &[AmortizationTerm],
    today: NaiveDate,
) -> Option<LoanEstimate> {
    let mut past: Vec<&AmortizationTerm> = terms.iter().filter(|t| t.date <= today).collect();
    past.sort_by_key(|t| t.date);
    let last = *past.last()?;

    let debt = last.remaining_debt;
    let interest_monthly = last.interest + last.margin;

    let annual_rate_pct = if debt > 0.0 && interest_monthly > 0.0 {
        let pct = (interest_monthly / debt * 12.0 * 100.0).clamp(0.0, MAX_MORTGAGE_RATE_PCT);
        Some((pct * 10.0).round() / 10.0)
    } else {
        None
    };

    let payment = last.principal + interest_monthly;
    let payment = if payment > 0.0 {
        Some(payment.round())
    } else {
        None
    };

    let term_years = if last.principal > 0.0 {
        Some(
            (debt / last.principal / 12.0)
                .clamp(MIN_TERM_YEARS, MAX_TERM_YEARS)
                .round(),
        )
    } else {
        None
    };

    debug!(
        "mortgage estimate: debt={:.0} rate={:?} payment={:?} term={:?}",
        debt, annual_rate_pct, payment, term_years
    );

    Some(LoanEstimate {
        balance: if debt > 0.0 { Some(debt.round()) } else { None },
        annual_rate_pct,
        payment,
        term_years,
    })
}

/// Pick the estimate matching the preferred target, falling back to the
/// first export with outstanding debt.
pub fn select_estimate(
    bank: Option<LoanEstimate>,
    mortgage: Option<LoanEstimate>,
    target: LoanTarget,
) -> Option<LoanEstimate> {
    let bank = bank.filter(LoanEstimate::has_debt);
    let mortgage = mortgage.filter(LoanEstimate::has_debt);
    match target {
        LoanTarget::BankLoan if bank.is_some() => bank,
        LoanTarget::Mortgage if mortgage.is_some() => mortgage,
        _ => bank.or(mortgage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const BANK_CSV: &str = "\
Date,Description,Amount,Balance
2025-05-01,Payment,-4000.00,-296000.00
2025-05-01,Interest on debt,-900.00,-296900.00
2025-06-01,Payment,-4000.00,-293800.00
2025-06-01,Interest on debt,-890.00,-294690.00
";

    const MORTGAGE_CSV: &str = "\
Date,Principal,Interest,Margin,RemainingDebt
2025-05-31,2400.00,1900.00,400.00,1202400.00
2025-06-30,2410.00,1895.00,399.00,1200000.00
";

    #[test]
    fn test_load_transactions_from_reader() {
        let records = load_transactions_from_reader(BANK_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].date, date(2025, 5, 1));
        assert_eq!(records[1].amount, -900.0);
        assert_eq!(records[3].balance, -294_690.0);
    }

    #[test]
    fn test_load_amortization_from_reader() {
        let terms = load_amortization_from_reader(MORTGAGE_CSV.as_bytes()).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[1].remaining_debt, 1_200_000.0);
    }

    #[test]
    fn test_bank_estimate_uses_latest_month() {
        let records = load_transactions_from_reader(BANK_CSV.as_bytes()).unwrap();
        let est = estimate_from_transactions(&records, date(2025, 7, 1)).unwrap();

        // June window: debt 294690, interest 890, outflow 4890
        assert_eq!(est.balance, Some(294_690.0));
        // 890 / 294690 * 12 * 100 = 3.624 -> 3.6
        assert_eq!(est.annual_rate_pct, Some(3.6));
        assert_eq!(est.payment, Some(4_890.0));
        // Annuity inversion lands on a plausible single-digit term
        let term = est.term_years.unwrap();
        assert!(term >= 5.0 && term <= 7.0, "term {}", term);
    }

    #[test]
    fn test_bank_estimate_ignores_future_rows() {
        let records = load_transactions_from_reader(BANK_CSV.as_bytes()).unwrap();
        let est = estimate_from_transactions(&records, date(2025, 5, 15)).unwrap();
        // Only May rows are visible
        assert_eq!(est.balance, Some(296_900.0));
    }

    #[test]
    fn test_bank_estimate_empty_history() {
        assert!(estimate_from_transactions(&[], date(2025, 1, 1)).is_none());
    }

    #[test]
    fn test_mortgage_estimate() {
        let terms = load_amortization_from_reader(MORTGAGE_CSV.as_bytes()).unwrap();
        let est = estimate_from_amortization(&terms, date(2025, 7, 1)).unwrap();

        assert_eq!(est.balance, Some(1_200_000.0));
        // (1895 + 399) / 1200000 * 12 * 100 = 2.294 -> 2.3
        assert_eq!(est.annual_rate_pct, Some(2.3));
        assert_eq!(est.payment, Some(4_704.0));
        // 1200000 / 2410 / 12 = 41.5 -> 41 or 42 depending on rounding
        let term = est.term_years.unwrap();
        assert!(term >= 41.0 && term <= 42.0, "term {}", term);
    }

    #[test]
    fn test_select_estimate_honors_target() {
        let bank = LoanEstimate {
            balance: Some(100.0),
            ..Default::default()
        };
        let mortgage = LoanEstimate {
            balance: Some(200.0),
            ..Default::default()
        };

        let picked = select_estimate(Some(bank), Some(mortgage), LoanTarget::Mortgage).unwrap();
        assert_eq!(picked.balance, Some(200.0));

        // Auto prefers the bank loan when both have debt
        let picked = select_estimate(Some(bank), Some(mortgage), LoanTarget::Auto).unwrap();
        assert_eq!(picked.balance, Some(100.0));
    }

    #[test]
    fn test_select_estimate_falls_back_on_empty_target() {
        let mortgage = LoanEstimate {
            balance: Some(200.0),
            ..Default::default()
        };
        // Bank loan requested but it has no debt
        let picked = select_estimate(None, Some(mortgage), LoanTarget::BankLoan).unwrap();
        assert_eq!(picked.balance, Some(200.0));

        assert!(select_estimate(None, None, LoanTarget::Auto).is_none());
    }
}
