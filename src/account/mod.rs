//! Account and loan scenario inputs, plus the export-ingestion collaborator

pub mod loader;
pub mod spec;

pub use spec::{InvestmentSpec, LoanSpec, TaxModel};
