//! Combined contribution-cap policy.
//!
//! A single lifetime ceiling shared across the initial lump sum and all
//! subsequent monthly contributions within one simulation run. The lump sum
//! consumes cap headroom before any monthly contribution accrues against it.

/// Remaining contribution headroom for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct ContributionCap {
    remaining: f64,
}

impl ContributionCap {
    /// Create the policy. `None` means unbounded (infinite headroom).
    pub fn new(cap: Option<f64>) -> Self {
        Self {
            remaining: cap.unwrap_or(f64::INFINITY),
        }
    }

    /// Allow as much of `desired` as the remaining headroom permits and
    /// consume it. Never returns a negative amount.
    pub fn allow(&mut self, desired: f64) -> f64 {
        let allowed = desired.max(0.0).min(self.remaining.max(0.0));
        self.remaining -= allowed;
        allowed
    }

    /// Remaining headroom (infinite when uncapped).
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Whether this run has a finite ceiling.
    pub fn is_capped(&self) -> bool {
        self.remaining.is_finite()
    }
}
