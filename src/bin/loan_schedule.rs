//! Dump the per-month baseline vs. extra-repayment comparison to CSV
//!
//! Usage: cargo run --bin loan_schedule

use std::fs::File;
use std::io::Write;

use finplan::projection::rate::month_anchor;
use finplan::projection::project_loan;
use finplan::LoanSpec;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Representative mortgage: 1.2M at 2.3% with 2k/month extra
    let spec = LoanSpec {
        label: "Extra repayment".to_string(),
        opening_balance: 1_200_000.0,
        annual_rate_pct: 2.3,
        term_years: 25.0,
        payment_override: None,
        extra_monthly: 2_000.0,
        extra_lump: 0.0,
        horizon_months: 300,
        start_date: month_anchor(2025, 7),
        interest_deduction_pct: 26.0,
    };

    println!("Loan schedule: {} over {} months", spec.label, spec.horizon_months);
    println!("  Opening balance: {:.2}", spec.opening_balance);
    println!("  Fixed payment:   {:.2}", spec.fixed_payment());
    println!("  Extra monthly:   {:.2}", spec.extra_monthly);
    println!();

    let result = project_loan(&spec);

    let csv_path = "loan_schedule.csv";
    let mut file = File::create(csv_path)?;
    writeln!(
        file,
        "Month,BaseInterest,BaseBalance,ExtraInterest,ExtraBalance,SavedAfterTax,CumulativeBenefit"
    )?;
    for (row, point) in result.monthly_rows.iter().zip(&result.points) {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.date.format("%Y-%m"),
            row.baseline.interest,
            row.baseline.balance,
            row.with_extra.interest,
            row.with_extra.balance,
            row.saved_after_tax,
            point.balance,
        )?;
    }

    println!("Full schedule written to: {}", csv_path);
    println!();
    println!("Summary:");
    println!("  Extra principal applied:  {:.2}", result.total_extra_applied);
    println!("  After-tax interest saved: {:.2}", result.interest_saved_after_tax);
    println!("  Benefit at horizon:       {:.2}", result.final_value);

    Ok(())
}
