//! Rust implementation of the course timetable search engine.
//!
//! Turns tiered candidate course sections into ranked, conflict-free,
//! credit-exact weekly schedules, and validates externally proposed
//! selections against the same rules.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::BTreeMap;

mod config;
pub mod filters;
pub mod grouping;
mod interner;
pub mod logging;
mod models;
pub mod ranking;
pub mod search;
pub mod timetable;
pub mod validation;

pub use config::{SearchConfig, DEFAULT_CREDIT_SLACK, DEFAULT_RESULT_CAP, DEFAULT_TARGET_CREDITS};
pub use filters::{Delivery, FilterError, Presence, SectionFilter, SectionOrder};
pub use grouping::{partition_by_tier, GroupingError, TierGroups};
pub use models::{
    sum_credits, tier_label, Credit, MeetingInterval, Schedule, Section, Tier, RANKED_TIERS,
    TIER_CORE_ELECTIVE, TIER_FOCUS_ELECTIVE, TIER_GENERAL_ELECTIVE, TIER_MAJOR_ELECTIVE,
    TIER_MAJOR_REQUIRED,
};
pub use ranking::{rank_schedules, RankKey};
pub use search::{search, ScheduleSearch, SearchError, SearchOutcome, SearchStats};
pub use timetable::{CalendarBlock, ConflictDetail};
pub use validation::{validate, validate_with_policy, ValidationPolicy, ValidationReport};

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Parse catalogue schedule text into meeting intervals.
///
/// # Returns
/// * `(is_online, meetings)`; malformed text yields fewer (or no) meetings
#[pyfunction]
#[pyo3(name = "parse_meeting_text")]
fn py_parse_meeting_text(text: &str) -> (bool, Vec<MeetingInterval>) {
    timetable::parse_meeting_text(text)
}

/// Search for conflict-free schedules hitting the credit targets exactly.
///
/// # Arguments
/// * `tiers` - Dict mapping tier number to its candidate sections
/// * `target_credits` - Exact total credits of every returned schedule
/// * `tier_credit_exact` - Optional (tier, credits) the tier's sub-total must equal
/// * `result_cap` - Stop after this many accepted schedules
/// * `verbosity` - Logging verbosity (0-3)
///
/// # Returns
/// * Ranked list of Schedules (empty if no combination fits)
///
/// # Raises
/// * ValueError on invalid configuration or sections
#[pyfunction]
#[pyo3(signature = (tiers, target_credits, tier_credit_exact=None, result_cap=DEFAULT_RESULT_CAP, verbosity=0))]
fn search_schedules(
    tiers: BTreeMap<Tier, Vec<Section>>,
    target_credits: Credit,
    tier_credit_exact: Option<(Tier, Credit)>,
    result_cap: usize,
    verbosity: u8,
) -> PyResult<Vec<Schedule>> {
    let config = SearchConfig {
        verbosity,
        ..SearchConfig::new(target_credits, tier_credit_exact, result_cap)
    };
    search_with_config(tiers, config).map(|outcome| outcome.schedules)
}

/// Search with a full SearchConfig, returning schedules and counters.
///
/// # Raises
/// * ValueError on invalid configuration or sections
#[pyfunction]
fn search_with_config(
    tiers: BTreeMap<Tier, Vec<Section>>,
    config: SearchConfig,
) -> PyResult<SearchOutcome> {
    let search = ScheduleSearch::new(tiers, config).map_err(to_py_err)?;
    Ok(search.run())
}

/// Validate an externally proposed selection.
///
/// Never raises for an invalid selection; every problem is listed in the report.
#[pyfunction]
#[pyo3(signature = (sections, target_credits, tier_credit_exact=None, policy=None))]
fn validate_selection(
    sections: Vec<Section>,
    target_credits: Credit,
    tier_credit_exact: Option<(Tier, Credit)>,
    policy: Option<ValidationPolicy>,
) -> ValidationReport {
    let policy = policy.unwrap_or_default();
    validate_with_policy(&sections, target_credits, tier_credit_exact, &policy)
}

/// Filter and order catalogue sections.
///
/// Choices accept English keywords or the host form's Korean labels.
///
/// # Raises
/// * ValueError on an unknown choice
#[pyfunction]
#[pyo3(name = "filter_sections", signature = (
    sections,
    eval_type="all",
    assignments="all",
    quizzes="all",
    credit=None,
    delivery="all",
    order="default"
))]
fn py_filter_sections(
    sections: Vec<Section>,
    eval_type: &str,
    assignments: &str,
    quizzes: &str,
    credit: Option<Credit>,
    delivery: &str,
    order: &str,
) -> PyResult<Vec<Section>> {
    let filter = SectionFilter::from_choices(eval_type, assignments, quizzes, credit, delivery)
        .map_err(to_py_err)?;
    let order: SectionOrder = order.parse().map_err(to_py_err)?;
    Ok(filters::filter_sections(&sections, &filter, order))
}

/// Lay out sections as per-weekday calendar blocks (0 = Monday).
#[pyfunction]
#[pyo3(name = "calendar_blocks")]
fn py_calendar_blocks(sections: Vec<Section>) -> BTreeMap<u8, Vec<CalendarBlock>> {
    timetable::calendar_blocks(&sections)
}

/// The timetable.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<MeetingInterval>()?;
    m.add_class::<Section>()?;
    m.add_class::<Schedule>()?;
    m.add_class::<ConflictDetail>()?;
    m.add_class::<CalendarBlock>()?;

    // Config and result types
    m.add_class::<SearchConfig>()?;
    m.add_class::<SearchStats>()?;
    m.add_class::<SearchOutcome>()?;
    m.add_class::<ValidationPolicy>()?;
    m.add_class::<ValidationReport>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_parse_meeting_text, m)?)?;
    m.add_function(wrap_pyfunction!(search_schedules, m)?)?;
    m.add_function(wrap_pyfunction!(search_with_config, m)?)?;
    m.add_function(wrap_pyfunction!(validate_selection, m)?)?;
    m.add_function(wrap_pyfunction!(py_filter_sections, m)?)?;
    m.add_function(wrap_pyfunction!(py_calendar_blocks, m)?)?;

    Ok(())
}
