//! Per-call search counters and the search result wrapper.

use pyo3::prelude::*;

use crate::models::Schedule;

/// Counters gathered during one search call.
///
/// Purely observational: nothing in the search reads them back.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Course-level and tier-level nodes entered
    #[pyo3(get)]
    pub nodes_visited: u64,
    /// Branches cut because credits exceeded target + slack
    #[pyo3(get)]
    pub pruned_over_credit: u64,
    /// Candidate sections skipped for a time conflict
    #[pyo3(get)]
    pub rejected_conflict: u64,
    /// Candidate sections skipped because the exact tier sub-total would overflow
    #[pyo3(get)]
    pub rejected_exact_tier: u64,
    /// Complete selections that missed a credit target
    #[pyo3(get)]
    pub rejected_leaves: u64,
    #[pyo3(get)]
    pub accepted: u64,
    /// The result cap stopped the search before exhaustion
    #[pyo3(get)]
    pub cap_reached: bool,
    /// The cancel flag stopped the search
    #[pyo3(get)]
    pub cancelled: bool,
}

#[pymethods]
impl SearchStats {
    fn __repr__(&self) -> String {
        format!(
            "SearchStats(nodes={}, accepted={}, pruned={}, conflicts={}, cap_reached={}, cancelled={})",
            self.nodes_visited,
            self.accepted,
            self.pruned_over_credit,
            self.rejected_conflict,
            self.cap_reached,
            self.cancelled
        )
    }
}

/// Ranked schedules plus the counters of the call that produced them.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    #[pyo3(get)]
    pub schedules: Vec<Schedule>,
    #[pyo3(get)]
    pub stats: SearchStats,
}

#[pymethods]
impl SearchOutcome {
    /// True if the search exhausted the space without hitting the cap or being cancelled.
    pub fn is_exhaustive(&self) -> bool {
        !self.stats.cap_reached && !self.stats.cancelled
    }

    fn __repr__(&self) -> String {
        format!(
            "SearchOutcome(schedules={}, stats={})",
            self.schedules.len(),
            self.stats.__repr__()
        )
    }
}
