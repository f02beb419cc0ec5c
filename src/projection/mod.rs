//! Monthly projection engines for investment accounts and loan scenarios

mod cap;
mod invest;
mod loan;
mod outcome;
pub mod rate;

pub use cap::ContributionCap;
pub use invest::project_investment;
pub use loan::project_loan;
pub use outcome::{
    InvestmentOutcome, LoanMonthRow, LoanOutcome, LoanSide, MonthPoint, ScenarioOutcome,
};
