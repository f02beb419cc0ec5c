//! Finplan - Personal-finance projection engine for investment and loan scenarios
//!
//! This library provides:
//! - Monthly investment-account projections under annual (mark-to-market) and deferred tax models
//! - Baseline vs. extra-repayment loan comparisons with after-tax interest-saved accounting
//! - A combined contribution-cap policy shared across lump and monthly deposits
//! - Scenario aggregation with a simple net-return ranking
//! - Best-effort loan prefill from bank and mortgage CSV exports

pub mod account;
pub mod error;
pub mod plan;
pub mod projection;
pub mod rules;
pub mod settings;

// Re-export commonly used types
pub use account::{InvestmentSpec, LoanSpec, TaxModel};
pub use error::PlanError;
pub use plan::{AccountConfig, InvestmentConfig, LoanConfig, Plan, PlanResult, Planner};
pub use projection::{project_investment, project_loan, InvestmentOutcome, LoanOutcome, ScenarioOutcome};
pub use settings::{LoanTarget, ReportSettings, SettingsStore};
