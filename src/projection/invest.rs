//! Investment-account projector.
//!
//! Simulates one account's balance month by month: growth, fee deduction,
//! cap-limited contribution, and tax under either the annual mark-to-market
//! model or the deferred model.

use crate::account::{InvestmentSpec, TaxModel};
use super::cap::ContributionCap;
use super::outcome::{InvestmentOutcome, MonthPoint};
use super::rate::{advance_months, monthly_rate};

/// Run one investment simulation.
///
/// Always produces a result: negative return rates shrink the balance, tax is
/// floored at zero gain, and the contribution cap floors at zero headroom.
/// The monthly fee is charged on the post-growth balance and is not floored:
/// a balance driven negative by large losses accrues negative fees.
pub fn project_investment(spec: &InvestmentSpec) -> InvestmentOutcome {
    let months = spec.horizon_months.max(1);
    let growth_rate = monthly_rate(spec.annual_return_pct);
    let fee_rate = monthly_rate(spec.annual_fee_pct);

    let starting = spec.starting_balance.max(0.0);
    let mut balance = starting;
    let mut total_contributed = 0.0;
    let mut total_fees = 0.0;
    let mut total_tax = 0.0;
    let mut gross_return = 0.0;

    // Year-gain baseline starts at the pre-lump balance; the lump counts as
    // a contribution of the first tax year
    let mut year_start_balance = balance;
    let mut contributed_this_year = 0.0;

    let mut cap = ContributionCap::new(spec.contribution_cap);
    let mut points = Vec::with_capacity(months as usize);

    // Lump sum consumes cap headroom before the monthly schedule starts
    if spec.lump_sum > 0.0 {
        let allowed = cap.allow(spec.lump_sum);
        balance += allowed;
        total_contributed += allowed;
        contributed_this_year += allowed;
    }

    for month in 0..months {
        let before = balance;
        balance *= 1.0 + growth_rate;
        gross_return += balance - before;

        let fee = balance * fee_rate;
        balance -= fee;
        total_fees += fee;

        let contribution = cap.allow(spec.monthly_contribution);
        balance += contribution;
        total_contributed += contribution;
        contributed_this_year += contribution;

        // Annual model: tax the year's unrealized gain at each completed
        // 12-month block
        if spec.tax_model == TaxModel::Annual && (month + 1) % 12 == 0 {
            let year_gain = balance - year_start_balance - contributed_this_year;
            let tax = year_gain.max(0.0) * spec.annual_tax_pct / 100.0;
            balance -= tax;
            total_tax += tax;
            year_start_balance = balance;
            contributed_this_year = 0.0;
        }

        points.push(MonthPoint {
            date: advance_months(spec.start_date, month),
            balance,
        });
    }

    // Deferred model: one tax charge on the total accumulated gain, applied
    // to the final balance and the last recorded point
    if spec.tax_model == TaxModel::Deferred {
        let gain = balance - starting - total_contributed;
        let tax = gain.max(0.0) * spec.annual_tax_pct / 100.0;
        balance -= tax;
        total_tax += tax;
        if let Some(last) = points.last_mut() {
            last.balance = balance;
        }
    }

    let net_return = balance - total_contributed - starting;

    InvestmentOutcome {
        label: spec.label.clone(),
        points,
        final_balance: balance,
        total_contributed,
        total_fees,
        total_tax,
        gross_return,
        net_return,
    }
}
