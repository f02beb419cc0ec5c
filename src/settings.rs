//! Report settings and their persistence adapter.
//!
//! The aggregator receives a [`ReportSettings`] value at call time and never
//! touches storage itself. [`SettingsStore`] is the isolated adapter: load
//! once at startup, save when a preference changes.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which loan export the prefill heuristic should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTarget {
    /// First export with positive outstanding debt wins
    #[default]
    Auto,
    BankLoan,
    Mortgage,
}

/// User preferences consumed by the aggregator and the prefill collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Count only after-tax interest saved as the loan scenario's net
    /// return, ignoring the debt-reduction delta
    pub flow_only: bool,

    /// Preferred loan export for prefilling the loan scenario
    pub loan_target: LoanTarget,
}

/// File-backed settings persistence.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. A corrupt file is reported but never fatal.
    pub fn load(&self) -> ReportSettings {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("no settings at {}: {}", self.path.display(), err);
                return ReportSettings::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "ignoring corrupt settings at {}: {}",
                    self.path.display(),
                    err
                );
                ReportSettings::default()
            }
        }
    }

    /// Persist the current settings.
    pub fn save(&self, settings: &ReportSettings) -> Result<()> {
        let raw = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
