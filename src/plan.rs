//! Scenario aggregation and ranking.
//!
//! A [`Plan`] describes the accounts and loans under consideration plus one
//! shared discretionary allocation. The [`Planner`] builds a projector input
//! for each entry, runs the matching projector, and ranks the outcomes by
//! net return. Each entry is evaluated independently against the same
//! nominal allocation; there is no cross-account split optimization.

use std::cmp::Ordering;

use chrono::NaiveDate;
use log::{debug, info};

use crate::account::loader::LoanEstimate;
use crate::account::spec::{
    DEFAULT_ANNUAL_RETURN_PCT, DEFAULT_CAPPED_FEE_PCT, DEFAULT_INTEREST_DEDUCTION_PCT,
    DEFAULT_LOAN_TERM_YEARS, DEFAULT_MONTHLY_ALLOCATION, DEFAULT_TAXABLE_FEE_PCT,
    DEFAULT_TAXABLE_TAX_PCT,
};
use crate::account::{InvestmentSpec, LoanSpec, TaxModel};
use crate::projection::rate::horizon_months;
use crate::projection::{project_investment, project_loan, ScenarioOutcome};
use crate::rules;
use crate::settings::ReportSettings;

/// Per-account configuration; the shared allocation and horizon live on the
/// [`Plan`].
#[derive(Debug, Clone)]
pub struct InvestmentConfig {
    pub label: String,
    pub starting_balance: f64,
    pub annual_return_pct: f64,
    pub annual_fee_pct: f64,
    pub annual_tax_pct: f64,
    pub tax_model: TaxModel,
    pub contribution_cap: Option<f64>,
}

impl InvestmentConfig {
    /// Capped share-savings account with the documented defaults
    /// (mark-to-market taxation).
    pub fn share_savings(label: &str, starting_balance: f64, cap_remaining: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            starting_balance,
            annual_return_pct: DEFAULT_ANNUAL_RETURN_PCT,
            annual_fee_pct: DEFAULT_CAPPED_FEE_PCT,
            annual_tax_pct: rules::CAPPED_ACCOUNT_TAX_PCT,
            tax_model: TaxModel::Annual,
            contribution_cap: cap_remaining,
        }
    }

    /// Uncapped taxable account with the documented defaults.
    pub fn taxable(label: &str, starting_balance: f64, tax_model: TaxModel) -> Self {
        Self {
            label: label.to_string(),
            starting_balance,
            annual_return_pct: DEFAULT_ANNUAL_RETURN_PCT,
            annual_fee_pct: DEFAULT_TAXABLE_FEE_PCT,
            annual_tax_pct: DEFAULT_TAXABLE_TAX_PCT,
            tax_model,
            contribution_cap: None,
        }
    }
}

/// Loan scenario configuration; the extra payments come from the plan's
/// shared allocation.
#[derive(Debug, Clone)]
pub struct LoanConfig {
    pub label: String,
    pub opening_balance: f64,
    pub annual_rate_pct: f64,
    pub term_years: f64,
    pub payment_override: Option<f64>,
    pub interest_deduction_pct: f64,
}

impl LoanConfig {
    /// Build a loan configuration from a prefill estimate, defaulting every
    /// field the estimate could not supply.
    pub fn from_estimate(label: &str, estimate: &LoanEstimate) -> Self {
        Self {
            label: label.to_string(),
            opening_balance: estimate.balance.unwrap_or(0.0),
            annual_rate_pct: estimate.annual_rate_pct.unwrap_or(0.0),
            term_years: estimate.term_years.unwrap_or(DEFAULT_LOAN_TERM_YEARS),
            payment_override: estimate.payment.filter(|p| *p > 0.0),
            interest_deduction_pct: DEFAULT_INTEREST_DEDUCTION_PCT,
        }
    }
}

/// One entry of a plan: an investment account or a loan.
#[derive(Debug, Clone)]
pub enum AccountConfig {
    Investment(InvestmentConfig),
    Loan(LoanConfig),
}

/// Everything one recompute pass needs: shared allocation, horizon, and the
/// configured accounts in registration order.
#[derive(Debug, Clone)]
pub struct Plan {
    pub horizon_years: f64,
    pub start_date: NaiveDate,

    /// Discretionary amount allocated every month
    pub monthly_allocation: f64,

    /// One-time amount allocated at the start
    pub lump_allocation: f64,

    pub accounts: Vec<AccountConfig>,
}

impl Plan {
    pub fn new(horizon_years: f64, start_date: NaiveDate) -> Self {
        Self {
            horizon_years,
            start_date,
            monthly_allocation: DEFAULT_MONTHLY_ALLOCATION,
            lump_allocation: 0.0,
            accounts: Vec::new(),
        }
    }

    pub fn add_investment(&mut self, config: InvestmentConfig) -> &mut Self {
        self.accounts.push(AccountConfig::Investment(config));
        self
    }

    pub fn add_loan(&mut self, config: LoanConfig) -> &mut Self {
        self.accounts.push(AccountConfig::Loan(config));
        self
    }
}

/// Ranked outcomes of one aggregation pass.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Outcomes sorted descending by net return; ties keep registration
    /// order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl PlanResult {
    /// Best-ranked outcome, if any account was configured.
    pub fn recommendation(&self) -> Option<&ScenarioOutcome> {
        self.outcomes.first()
    }
}

/// Runs every configured account through its projector and ranks the
/// results. Holds the report settings passed in at call time; re-running is
/// always safe and prior results can be discarded.
#[derive(Debug, Clone)]
pub struct Planner {
    settings: ReportSettings,
}

impl Planner {
    pub fn new(settings: ReportSettings) -> Self {
        Self { settings }
    }

    /// Run one full aggregation pass.
    pub fn run(&self, plan: &Plan) -> PlanResult {
        let months = horizon_months(plan.horizon_years);
        let mut outcomes = Vec::with_capacity(plan.accounts.len());

        for account in &plan.accounts {
            let outcome = match account {
                AccountConfig::Investment(config) => {
                    let spec = InvestmentSpec {
                        label: config.label.clone(),
                        starting_balance: config.starting_balance,
                        monthly_contribution: plan.monthly_allocation,
                        lump_sum: plan.lump_allocation,
                        horizon_months: months,
                        start_date: plan.start_date,
                        annual_return_pct: config.annual_return_pct,
                        annual_fee_pct: config.annual_fee_pct,
                        annual_tax_pct: config.annual_tax_pct,
                        tax_model: config.tax_model,
                        contribution_cap: config.contribution_cap,
                    };
                    ScenarioOutcome::Investment(project_investment(&spec))
                }
                AccountConfig::Loan(config) => {
                    let spec = LoanSpec {
                        label: config.label.clone(),
                        opening_balance: config.opening_balance,
                        annual_rate_pct: config.annual_rate_pct,
                        term_years: config.term_years,
                        payment_override: config.payment_override,
                        extra_monthly: plan.monthly_allocation,
                        extra_lump: plan.lump_allocation,
                        horizon_months: months,
                        start_date: plan.start_date,
                        interest_deduction_pct: config.interest_deduction_pct,
                    };
                    let mut result = project_loan(&spec);
                    if self.settings.flow_only {
                        result.net_return = result.interest_saved_after_tax;
                    }
                    ScenarioOutcome::Loan(result)
                }
            };
            debug!(
                "{}: final {:.2}, net return {:.2}",
                outcome.label(),
                outcome.final_value(),
                outcome.net_return()
            );
            outcomes.push(outcome);
        }

        // Stable sort: equal net returns keep registration order
        outcomes.sort_by(|a, b| {
            b.net_return()
                .partial_cmp(&a.net_return())
                .unwrap_or(Ordering::Equal)
        });

        if let Some(best) = outcomes.first() {
            info!(
                "ranked {} scenarios over {} months, best: {}",
                outcomes.len(),
                months,
                best.label()
            );
        }

        PlanResult { outcomes }
    }
}
