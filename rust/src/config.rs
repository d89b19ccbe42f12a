//! Configuration types for the schedule search.

use pyo3::prelude::*;

use crate::models::{Credit, Tier};
use crate::search::SearchError;

/// Default total credit load (one full-time semester).
pub const DEFAULT_TARGET_CREDITS: Credit = 16;
/// Default number of accepted schedules before the search stops.
pub const DEFAULT_RESULT_CAP: usize = 30;
/// Overshoot allowed on the running credit total before a branch is pruned.
pub const DEFAULT_CREDIT_SLACK: Credit = 3;

/// Configuration for one schedule search call.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Restrict the search to these tiers (None = every tier in the input)
    #[pyo3(get, set)]
    pub tiers: Option<Vec<Tier>>,
    /// Exact total credits every accepted schedule must reach
    #[pyo3(get, set)]
    pub target_credits: Credit,
    /// Optional (tier, credits): that tier's sub-total must match exactly
    #[pyo3(get, set)]
    pub tier_credit_exact: Option<(Tier, Credit)>,
    /// Maximum number of accepted schedules
    #[pyo3(get, set)]
    pub result_cap: usize,
    /// Prune a branch once its credits exceed target + slack
    #[pyo3(get, set)]
    pub credit_slack: Credit,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tiers: None,
            target_credits: DEFAULT_TARGET_CREDITS,
            tier_credit_exact: None,
            result_cap: DEFAULT_RESULT_CAP,
            credit_slack: DEFAULT_CREDIT_SLACK,
            verbosity: 0,
        }
    }
}

impl SearchConfig {
    pub fn new(
        target_credits: Credit,
        tier_credit_exact: Option<(Tier, Credit)>,
        result_cap: usize,
    ) -> Self {
        Self {
            target_credits,
            tier_credit_exact,
            result_cap,
            ..Self::default()
        }
    }

    /// Reject values that would make the search meaningless.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.target_credits < 0 {
            return Err(SearchError::InvalidConfig(format!(
                "target_credits must be non-negative, got {}",
                self.target_credits
            )));
        }
        if self.result_cap == 0 {
            return Err(SearchError::InvalidConfig(
                "result_cap must be at least 1".to_string(),
            ));
        }
        if self.credit_slack < 0 {
            return Err(SearchError::InvalidConfig(format!(
                "credit_slack must be non-negative, got {}",
                self.credit_slack
            )));
        }
        if let Some((tier, credits)) = self.tier_credit_exact {
            if credits < 0 {
                return Err(SearchError::InvalidConfig(format!(
                    "exact credits for tier {} must be non-negative, got {}",
                    tier, credits
                )));
            }
        }
        Ok(())
    }

    /// Whether `tier` takes part in the search.
    pub fn includes_tier(&self, tier: Tier) -> bool {
        self.tiers.as_ref().map_or(true, |tiers| tiers.contains(&tier))
    }
}

#[pymethods]
impl SearchConfig {
    #[new]
    #[pyo3(signature = (
        target_credits=None,
        tier_credit_exact=None,
        result_cap=None,
        tiers=None,
        credit_slack=None,
        verbosity=0
    ))]
    fn py_new(
        target_credits: Option<Credit>,
        tier_credit_exact: Option<(Tier, Credit)>,
        result_cap: Option<usize>,
        tiers: Option<Vec<Tier>>,
        credit_slack: Option<Credit>,
        verbosity: u8,
    ) -> Self {
        let defaults = Self::default();
        Self {
            tiers,
            target_credits: target_credits.unwrap_or(defaults.target_credits),
            tier_credit_exact,
            result_cap: result_cap.unwrap_or(defaults.result_cap),
            credit_slack: credit_slack.unwrap_or(defaults.credit_slack),
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SearchConfig(target_credits={}, tier_credit_exact={:?}, result_cap={}, tiers={:?})",
            self.target_credits, self.tier_credit_exact, self.result_cap, self.tiers
        )
    }
}
