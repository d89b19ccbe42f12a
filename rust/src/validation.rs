//! Validation of externally proposed section selections.
//!
//! The search only ever builds valid schedules; this module checks a selection
//! that came from somewhere else (a hand-picked list, a refinement layer) against
//! the same acceptance rules and reports every problem instead of failing on the
//! first one.

use pyo3::prelude::*;
use rustc_hash::FxHashSet;

use crate::models::{sum_credits, Credit, Section, Tier};
use crate::timetable::{conflict_details, ConflictDetail};

/// Optional checks on top of the credit and conflict rules.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationPolicy {
    /// Upper bound on credits from online sections
    #[pyo3(get, set)]
    pub max_online_credits: Option<Credit>,
    /// Tiers that had at least one available course; enables the skipped-tier check
    #[pyo3(get, set)]
    pub available_tiers: Option<Vec<Tier>>,
}

#[pymethods]
impl ValidationPolicy {
    #[new]
    #[pyo3(signature = (max_online_credits=None, available_tiers=None))]
    fn new(max_online_credits: Option<Credit>, available_tiers: Option<Vec<Tier>>) -> Self {
        Self {
            max_online_credits,
            available_tiers,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ValidationPolicy(max_online_credits={:?}, available_tiers={:?})",
            self.max_online_credits, self.available_tiers
        )
    }
}

/// Outcome of validating one selection.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    #[pyo3(get)]
    pub is_valid: bool,
    #[pyo3(get)]
    pub total_credits: Credit,
    /// Credits of the exact-constrained tier (0 when no constraint is given)
    #[pyo3(get)]
    pub tier_subtotal: Credit,
    #[pyo3(get)]
    pub has_conflict: bool,
    /// Course ids that appear more than once, in first-repeat order
    #[pyo3(get)]
    pub duplicate_courses: Vec<String>,
    #[pyo3(get)]
    pub conflicts: Vec<ConflictDetail>,
    #[pyo3(get)]
    pub online_credits: Credit,
    #[pyo3(get)]
    pub online_limit_exceeded: bool,
    /// Available tiers left empty while a lower-priority tier was used
    #[pyo3(get)]
    pub skipped_tiers: Vec<Tier>,
}

#[pymethods]
impl ValidationReport {
    fn __repr__(&self) -> String {
        format!(
            "ValidationReport(is_valid={}, total_credits={}, tier_subtotal={}, conflicts={}, duplicates={:?})",
            self.is_valid,
            self.total_credits,
            self.tier_subtotal,
            self.conflicts.len(),
            self.duplicate_courses
        )
    }
}

/// Check `sections` against the credit targets, conflict freedom and course
/// uniqueness.
pub fn validate(
    sections: &[Section],
    target_credits: Credit,
    tier_credit_exact: Option<(Tier, Credit)>,
) -> ValidationReport {
    validate_with_policy(
        sections,
        target_credits,
        tier_credit_exact,
        &ValidationPolicy::default(),
    )
}

/// Like [`validate`], plus the optional checks enabled in `policy`.
pub fn validate_with_policy(
    sections: &[Section],
    target_credits: Credit,
    tier_credit_exact: Option<(Tier, Credit)>,
    policy: &ValidationPolicy,
) -> ValidationReport {
    let total_credits = sum_credits(sections);

    let tier_subtotal: Credit = match tier_credit_exact {
        Some((tier, _)) => sum_credits(sections.iter().filter(|s| s.tier == tier)),
        None => 0,
    };
    let tier_ok = tier_credit_exact.map_or(true, |(_, exact)| tier_subtotal == exact);

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut duplicate_courses: Vec<String> = Vec::new();
    for section in sections {
        if !seen.insert(section.course_id.as_str())
            && !duplicate_courses.contains(&section.course_id)
        {
            duplicate_courses.push(section.course_id.clone());
        }
    }

    let conflicts = conflict_details(sections);
    let has_conflict = !conflicts.is_empty();

    let online_credits = sum_credits(sections.iter().filter(|s| s.is_online));
    let online_limit_exceeded = policy
        .max_online_credits
        .map_or(false, |limit| online_credits > limit);

    let skipped_tiers = match &policy.available_tiers {
        Some(available) => skipped_tiers(sections, available),
        None => Vec::new(),
    };

    let is_valid = total_credits == target_credits
        && tier_ok
        && !has_conflict
        && duplicate_courses.is_empty()
        && !online_limit_exceeded
        && skipped_tiers.is_empty();

    ValidationReport {
        is_valid,
        total_credits,
        tier_subtotal,
        has_conflict,
        duplicate_courses,
        conflicts,
        online_credits,
        online_limit_exceeded,
        skipped_tiers,
    }
}

/// Available tiers with no selected section while some lower-priority
/// (higher-numbered) tier has one. Ascending, deduplicated.
fn skipped_tiers(sections: &[Section], available: &[Tier]) -> Vec<Tier> {
    let used: FxHashSet<Tier> = sections.iter().map(|s| s.tier).collect();
    let Some(&lowest_used) = used.iter().max() else {
        return Vec::new();
    };

    let mut skipped: Vec<Tier> = available
        .iter()
        .copied()
        .filter(|tier| *tier < lowest_used && !used.contains(tier))
        .collect();
    skipped.sort_unstable();
    skipped.dedup();
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section(id: &str, course: &str, credit: Credit, tier: Tier, time: &str) -> Section {
        Section::from_time_text(id, course, credit, tier, time)
    }

    #[test]
    fn test_valid_selection() {
        let sections = vec![
            make_section("a-01", "A", 3, 1, "월1,2,3"),
            make_section("b-01", "B", 3, 4, "화1,2,3"),
        ];
        let report = validate(&sections, 6, Some((4, 3)));
        assert!(report.is_valid);
        assert_eq!(report.total_credits, 6);
        assert_eq!(report.tier_subtotal, 3);
        assert!(!report.has_conflict);
        assert!(report.duplicate_courses.is_empty());
    }

    #[test]
    fn test_reports_every_problem() {
        let sections = vec![
            make_section("a-01", "A", 3, 1, "월1,2,3"),
            make_section("a-02", "A", 3, 1, "수1,2,3"),
            make_section("b-01", "B", 2, 4, "월3,4"),
        ];
        let report = validate(&sections, 6, Some((4, 3)));

        assert!(!report.is_valid);
        assert_eq!(report.total_credits, 8);
        assert_eq!(report.tier_subtotal, 2);
        assert!(report.has_conflict);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].periods, vec![3]);
        assert_eq!(report.duplicate_courses, vec!["A".to_string()]);
    }

    #[test]
    fn test_without_exact_tier() {
        let sections = vec![make_section("a-01", "A", 3, 4, "")];
        let report = validate(&sections, 3, None);
        assert!(report.is_valid);
        assert_eq!(report.tier_subtotal, 0);
    }

    #[test]
    fn test_empty_selection() {
        let report = validate(&[], 0, None);
        assert!(report.is_valid);
        let report = validate(&[], 3, None);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_huge_credits_saturate() {
        let sections = vec![
            make_section("a-01", "A", 3, 4, "월1,2"),
            make_section("b-01", "B", Credit::MAX, 4, "화1,2"),
        ];
        let report = validate(&sections, 3, Some((4, 3)));
        assert_eq!(report.total_credits, Credit::MAX);
        assert_eq!(report.tier_subtotal, Credit::MAX);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_online_credit_limit() {
        let sections = vec![
            make_section("w-01", "W", 3, 5, "웹강의"),
            make_section("v-01", "V", 3, 5, "온라인"),
        ];
        let policy = ValidationPolicy {
            max_online_credits: Some(3),
            available_tiers: None,
        };
        let report = validate_with_policy(&sections, 6, None, &policy);
        assert_eq!(report.online_credits, 6);
        assert!(report.online_limit_exceeded);
        assert!(!report.is_valid);

        // Without a policy the limit is not enforced
        assert!(validate(&sections, 6, None).is_valid);
    }

    #[test]
    fn test_skipped_tiers() {
        let sections = vec![
            make_section("a-01", "A", 3, 1, "월1,2"),
            make_section("e-01", "E", 3, 5, "화1,2"),
        ];
        let policy = ValidationPolicy {
            max_online_credits: None,
            available_tiers: Some(vec![5, 3, 1, 2, 3]),
        };
        let report = validate_with_policy(&sections, 6, None, &policy);
        assert_eq!(report.skipped_tiers, vec![2, 3]);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_unavailable_tiers_not_skipped() {
        let sections = vec![make_section("e-01", "E", 3, 5, "화1,2")];
        let policy = ValidationPolicy {
            max_online_credits: None,
            available_tiers: Some(vec![5]),
        };
        let report = validate_with_policy(&sections, 3, None, &policy);
        assert!(report.skipped_tiers.is_empty());
        assert!(report.is_valid);
    }
}
