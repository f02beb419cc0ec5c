//! Finplan CLI
//!
//! Runs one aggregation pass over the configured accounts and the loan
//! scenario prefilled from CSV exports, prints the ranked comparison, and
//! writes the projection series to CSV.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Datelike, Utc};
use clap::Parser;
use log::debug;

use finplan::account::loader::{
    estimate_from_amortization, estimate_from_transactions, load_amortization, load_transactions,
    select_estimate,
};
use finplan::account::spec::{DEFAULT_HORIZON_YEARS, DEFAULT_MONTHLY_ALLOCATION};
use finplan::projection::rate::month_anchor;
use finplan::{
    InvestmentConfig, LoanConfig, LoanTarget, Plan, Planner, ScenarioOutcome, SettingsStore,
    TaxModel,
};

/// Bank-loan export filename inside the data directory
const BANK_LOAN_EXPORT: &str = "bank-loan.csv";

/// Mortgage export filename inside the data directory
const MORTGAGE_EXPORT: &str = "mortgage.csv";

#[derive(Parser, Debug)]
#[command(name = "finplan", about = "Personal-finance projection and allocation ranking")]
struct Args {
    /// Directory containing account CSV exports
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Projection horizon in years
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    years: f64,

    /// Discretionary allocation per month
    #[arg(long, default_value_t = DEFAULT_MONTHLY_ALLOCATION)]
    monthly: f64,

    /// One-time lump sum allocation
    #[arg(long, default_value_t = 0.0)]
    lump: f64,

    /// Start month as YYYY-MM (defaults to the current month)
    #[arg(long)]
    start: Option<String>,

    /// Starting balance of the capped share-savings account
    #[arg(long, default_value_t = 0.0)]
    capped_start: f64,

    /// Remaining deposit headroom on the capped account; when omitted the
    /// published yearly cap minus the starting balance is used
    #[arg(long)]
    cap_remaining: Option<f64>,

    /// Starting balance of the taxable account
    #[arg(long, default_value_t = 0.0)]
    taxable_start: f64,

    /// Count only after-tax interest saved as the loan's net return
    #[arg(long)]
    flow_only: bool,

    /// Preferred loan export for the prefill: auto, bank or mortgage
    #[arg(long)]
    loan_target: Option<String>,

    /// Settings file
    #[arg(long, default_value = "finplan-settings.json")]
    settings: PathBuf,

    /// Output CSV for the projection series
    #[arg(long, default_value = "plan_output.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Finplan v{}", env!("CARGO_PKG_VERSION"));
    println!("=============\n");

    // Settings: load at startup, save when a preference changes
    let store = SettingsStore::new(&args.settings);
    let mut settings = store.load();
    let mut changed = false;
    if args.flow_only && !settings.flow_only {
        settings.flow_only = true;
        changed = true;
    }
    if let Some(ref target) = args.loan_target {
        let parsed = match target.as_str() {
            "auto" => LoanTarget::Auto,
            "bank" => LoanTarget::BankLoan,
            "mortgage" => LoanTarget::Mortgage,
            other => bail!("unknown loan target: {}", other),
        };
        if parsed != settings.loan_target {
            settings.loan_target = parsed;
            changed = true;
        }
    }
    if changed {
        store.save(&settings).context("saving settings")?;
    }

    let today = Utc::now().date_naive();
    let start_date = match args.start {
        Some(ref ym) => {
            let (year, month) = ym
                .split_once('-')
                .and_then(|(y, m)| Some((y.parse().ok()?, m.parse().ok()?)))
                .with_context(|| format!("invalid start month: {}", ym))?;
            month_anchor(year, month)
        }
        None => month_anchor(today.year(), today.month()),
    };

    let mut plan = Plan::new(args.years, start_date);
    plan.monthly_allocation = args.monthly;
    plan.lump_allocation = args.lump;

    let cap_remaining = args.cap_remaining.filter(|v| *v > 0.0).or_else(|| {
        finplan::rules::contribution_cap_for_year(today.year())
            .map(|_| finplan::rules::remaining_capacity(today.year(), args.capped_start))
    });
    plan.add_investment(InvestmentConfig::share_savings(
        "Share savings account",
        args.capped_start,
        cap_remaining,
    ));
    plan.add_investment(InvestmentConfig::taxable(
        "Taxable investments",
        args.taxable_start,
        TaxModel::Annual,
    ));

    // Loan scenario prefilled from whatever exports are present
    let bank = load_transactions(args.data_dir.join(BANK_LOAN_EXPORT))
        .map_err(|err| debug!("no bank-loan export: {}", err))
        .ok()
        .and_then(|records| estimate_from_transactions(&records, today));
    let mortgage = load_amortization(args.data_dir.join(MORTGAGE_EXPORT))
        .map_err(|err| debug!("no mortgage export: {}", err))
        .ok()
        .and_then(|terms| estimate_from_amortization(&terms, today));
    match select_estimate(bank, mortgage, settings.loan_target) {
        Some(estimate) => {
            plan.add_loan(LoanConfig::from_estimate("Extra repayment", &estimate));
        }
        None => debug!("no loan export data, skipping the loan scenario"),
    }

    let result = Planner::new(settings).run(&plan);

    // Ranked comparison table
    println!(
        "{:<24} {:>14} {:>14} {:>12} {:>12} {:>14}",
        "Scenario", "Contributed", "Gross return", "Tax", "Fees", "Net return"
    );
    println!("{}", "-".repeat(94));
    for outcome in &result.outcomes {
        let (tax, fees) = match outcome {
            ScenarioOutcome::Investment(inv) => (fmt_dkk(inv.total_tax), fmt_dkk(inv.total_fees)),
            ScenarioOutcome::Loan(_) => ("—".to_string(), "—".to_string()),
        };
        println!(
            "{:<24} {:>14} {:>14} {:>12} {:>12} {:>14}",
            outcome.label(),
            fmt_dkk(outcome.total_contributed()),
            fmt_dkk(outcome.gross_return()),
            tax,
            fees,
            fmt_dkk(outcome.net_return()),
        );
    }

    if let Some(best) = result.recommendation() {
        println!("\nRecommendation (by net return): {}", best.label());
    }

    // Loan detail: last 12 months of the baseline vs. extra comparison
    for outcome in &result.outcomes {
        if let ScenarioOutcome::Loan(loan) = outcome {
            println!("\n{} — last 12 months:", loan.label);
            println!(
                "{:<10} {:>14} {:>14} {:>14}",
                "Month", "Base interest", "Extra interest", "Saved (net)"
            );
            for row in loan.monthly_rows.iter().rev().take(12).rev() {
                println!(
                    "{:<10} {:>14} {:>14} {:>14}",
                    row.date.format("%Y-%m"),
                    fmt_dkk(row.baseline.interest),
                    fmt_dkk(row.with_extra.interest),
                    fmt_dkk(row.saved_after_tax),
                );
            }
            println!(
                "After-tax interest saved: {}   Debt reduction at horizon: {}",
                fmt_dkk(loan.interest_saved_after_tax),
                fmt_dkk(loan.final_value - loan.interest_saved_after_tax),
            );
        }
    }

    // Full series to CSV for charting collaborators
    let mut file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writeln!(file, "Scenario,Date,Balance")?;
    for outcome in &result.outcomes {
        for point in outcome.points() {
            writeln!(
                file,
                "{},{},{:.2}",
                outcome.label(),
                point.date.format("%Y-%m-%d"),
                point.balance
            )?;
        }
    }
    println!("\nProjection series written to: {}", args.output.display());

    Ok(())
}

/// Format an amount as Danish kroner for display (thousands separated with
/// periods, no decimals).
fn fmt_dkk(value: f64) -> String {
    let negative = value < 0.0;
    let digits = (value.abs().round() as i64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}{} kr.", if negative { "-" } else { "" }, grouped)
}
