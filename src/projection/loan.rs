//! Extra-repayment loan projector.
//!
//! Advances two parallel amortization trajectories (the contractual baseline
//! and a variant with extra principal payments) and accounts the after-tax
//! value of the interest saved. The recorded series is the cumulative benefit
//! of the extra-repayment strategy, not a debt balance.

use crate::account::LoanSpec;
use super::outcome::{LoanMonthRow, LoanOutcome, LoanSide, MonthPoint};
use super::rate::{advance_months, monthly_rate};

/// Run one baseline-vs-extra loan comparison.
pub fn project_loan(spec: &LoanSpec) -> LoanOutcome {
    let months = spec.horizon_months.max(1);
    let rate = monthly_rate(spec.annual_rate_pct);
    let payment = spec.fixed_payment();

    let mut base_balance = spec.opening_balance;
    let mut extra_balance = spec.opening_balance;
    let mut total_extra_applied = 0.0;
    let mut extra_lump_remaining = spec.extra_lump.max(0.0);
    let mut saved_after_tax_cum = 0.0;

    // Share of each saved interest krone actually kept once the lost
    // deduction value is accounted for
    let keep_rate = 1.0 - spec.interest_deduction_pct / 100.0;

    let mut points = Vec::with_capacity(months as usize);
    let mut monthly_rows = Vec::with_capacity(months as usize);

    for month in 0..months {
        let date = advance_months(spec.start_date, month);

        // Baseline path: interest accrues, then the fixed payment
        let mut base_interest = 0.0;
        if base_balance > 0.0 {
            base_interest = base_balance * rate;
            let principal = (payment - base_interest).max(0.0).min(base_balance);
            base_balance -= principal;
        }

        // Extra path: prepay principal before interest accrues, then the
        // same fixed payment as the baseline
        let mut extra_interest = 0.0;
        if extra_balance > 0.0 {
            let mut extra_payment = spec.extra_monthly.max(0.0);
            if month == 0 && extra_lump_remaining > 0.0 {
                extra_payment += extra_lump_remaining;
                extra_lump_remaining = 0.0;
            }
            if extra_payment > 0.0 {
                let prepay = extra_payment.min(extra_balance);
                extra_balance -= prepay;
                total_extra_applied += prepay;
            }

            extra_interest = extra_balance * rate;
            let principal = (payment - extra_interest).max(0.0).min(extra_balance);
            extra_balance -= principal;
        }

        let interest_saved = (base_interest - extra_interest).max(0.0);
        let saved_after_tax = interest_saved * keep_rate;
        saved_after_tax_cum += saved_after_tax;

        let debt_delta = (base_balance - extra_balance).max(0.0);
        points.push(MonthPoint {
            date,
            balance: debt_delta + saved_after_tax_cum,
        });
        monthly_rows.push(LoanMonthRow {
            date,
            baseline: LoanSide {
                interest: base_interest,
                balance: base_balance,
            },
            with_extra: LoanSide {
                interest: extra_interest,
                balance: extra_balance,
            },
            saved_after_tax,
        });
    }

    let final_value = points.last().map(|p| p.balance).unwrap_or(0.0);

    LoanOutcome {
        label: spec.label.clone(),
        points,
        final_value,
        total_extra_applied,
        interest_saved_after_tax: saved_after_tax_cum,
        net_return: final_value,
        monthly_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::rate::month_anchor;

    fn base_spec() -> LoanSpec {
        LoanSpec {
            label: "test".to_string(),
            opening_balance: 200_000.0,
            annual_rate_pct: 3.5,
            term_years: 20.0,
            payment_override: None,
            extra_monthly: 0.0,
            extra_lump: 0.0,
            horizon_months: 240,
            start_date: month_anchor(2025, 1),
            interest_deduction_pct: 26.0,
        }
    }

    #[test]
    fn test_amortized_payment_retires_loan_at_term() {
        let spec = base_spec();
        let result = project_loan(&spec);

        // Without extras the baseline retires within the term
        let last = result.monthly_rows.last().unwrap();
        assert!(
            last.baseline.balance.abs() < 0.01,
            "residual balance {}",
            last.baseline.balance
        );
        // And not meaningfully earlier than the final month
        let month_238 = &result.monthly_rows[237];
        assert!(month_238.baseline.balance > 0.0);
    }

    #[test]
    fn test_no_extra_means_no_benefit() {
        let spec = base_spec();
        let result = project_loan(&spec);

        assert_eq!(result.total_extra_applied, 0.0);
        assert_eq!(result.interest_saved_after_tax, 0.0);
        assert_eq!(result.final_value, 0.0);
        for point in &result.points {
            assert_eq!(point.balance, 0.0);
        }
    }

    #[test]
    fn test_interest_saved_never_negative() {
        let mut spec = base_spec();
        spec.extra_monthly = 2_000.0;
        spec.extra_lump = 10_000.0;

        let result = project_loan(&spec);
        for row in &result.monthly_rows {
            assert!(row.saved_after_tax >= 0.0);
        }
        assert!(result.interest_saved_after_tax > 0.0);
    }

    #[test]
    fn test_extra_payments_shorten_payoff() {
        let mut spec = base_spec();
        spec.extra_monthly = 1_500.0;

        let result = project_loan(&spec);
        let extra_payoff = result
            .monthly_rows
            .iter()
            .position(|r| r.with_extra.balance < 0.01)
            .expect("extra path should retire within horizon");
        let base_payoff = result
            .monthly_rows
            .iter()
            .position(|r| r.baseline.balance < 0.01)
            .expect("baseline should retire within horizon");
        assert!(extra_payoff < base_payoff);
    }

    #[test]
    fn test_lump_applied_only_in_first_month() {
        let mut spec = base_spec();
        spec.extra_lump = 50_000.0;
        spec.horizon_months = 24;

        let result = project_loan(&spec);
        let first = &result.monthly_rows[0];
        // First month's extra balance reflects the prepayment before the
        // regular payment
        assert!(first.with_extra.balance < first.baseline.balance - 49_000.0);
        assert_eq!(result.total_extra_applied, 50_000.0);
    }

    #[test]
    fn test_extra_capped_by_outstanding_balance() {
        let mut spec = base_spec();
        spec.opening_balance = 10_000.0;
        spec.term_years = 10.0;
        spec.extra_lump = 50_000.0;
        spec.horizon_months = 12;

        let result = project_loan(&spec);
        assert_eq!(result.total_extra_applied, 10_000.0);
        let first = &result.monthly_rows[0];
        assert_eq!(first.with_extra.balance, 0.0);
        assert_eq!(first.with_extra.interest, 0.0);
    }

    #[test]
    fn test_after_tax_keep_rate() {
        let mut spec = base_spec();
        spec.extra_monthly = 2_000.0;
        spec.interest_deduction_pct = 26.0;

        let with_deduction = project_loan(&spec);

        spec.interest_deduction_pct = 0.0;
        let without_deduction = project_loan(&spec);

        // Losing a 26% deduction keeps 74% of each saved krone
        let ratio =
            with_deduction.interest_saved_after_tax / without_deduction.interest_saved_after_tax;
        assert!((ratio - 0.74).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_loan_saves_no_interest() {
        let mut spec = base_spec();
        spec.annual_rate_pct = 0.0;
        spec.extra_monthly = 1_000.0;
        spec.horizon_months = 24;

        let result = project_loan(&spec);
        assert_eq!(result.interest_saved_after_tax, 0.0);
        // The benefit is pure debt reduction
        let last = result.points.last().unwrap();
        assert!(last.balance > 0.0);
        assert_eq!(last.balance, result.final_value);
    }

    #[test]
    fn test_benefit_combines_debt_delta_and_saved_interest() {
        let mut spec = base_spec();
        spec.extra_monthly = 1_000.0;
        spec.horizon_months = 12;

        let result = project_loan(&spec);
        let last_row = result.monthly_rows.last().unwrap();
        let debt_delta = (last_row.baseline.balance - last_row.with_extra.balance).max(0.0);
        let expected = debt_delta + result.interest_saved_after_tax;
        assert!((result.final_value - expected).abs() < 1e-9);
    }
}
