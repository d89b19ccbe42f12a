//! Accumulator state for one search call.

use rustc_hash::FxHashSet;

use crate::interner::CourseKey;
use crate::models::{Credit, Schedule, Section};

use super::stats::SearchStats;

/// Mutable state threaded through the recursion of a single search.
///
/// Created by `ScheduleSearch::run` and dropped when it returns; never shared
/// between calls.
pub(super) struct SearchState<'a> {
    /// Sections chosen on the current branch
    pub selection: Vec<&'a Section>,
    /// Courses with a section on the current branch
    taken: FxHashSet<CourseKey>,
    pub total_credits: Credit,
    /// Running credits of the tier under the exact-credit constraint
    pub exact_tier_credits: Credit,
    pub accepted: Vec<Schedule>,
    pub stats: SearchStats,
}

impl<'a> SearchState<'a> {
    pub fn new(course_count: usize) -> Self {
        Self {
            selection: Vec::with_capacity(course_count),
            taken: FxHashSet::with_capacity_and_hasher(course_count, Default::default()),
            total_credits: 0,
            exact_tier_credits: 0,
            accepted: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn is_taken(&self, key: CourseKey) -> bool {
        self.taken.contains(&key)
    }

    /// Add `section` to the branch. The caller has already checked that the
    /// new totals stay within their bounds.
    pub fn place(&mut self, section: &'a Section, key: CourseKey, counts_for_exact: bool) {
        self.selection.push(section);
        self.taken.insert(key);
        self.total_credits += section.credit;
        if counts_for_exact {
            self.exact_tier_credits += section.credit;
        }
    }

    /// Undo the matching `place`.
    pub fn unplace(&mut self, section: &'a Section, key: CourseKey, counts_for_exact: bool) {
        self.selection.pop();
        self.taken.remove(&key);
        self.total_credits -= section.credit;
        if counts_for_exact {
            self.exact_tier_credits -= section.credit;
        }
    }

    /// Snapshot the current branch as an accepted schedule.
    pub fn accept(&mut self) -> &Schedule {
        let schedule = Schedule::from_sections(self.selection.iter().map(|&s| s.clone()).collect());
        self.stats.accepted += 1;
        self.accepted.push(schedule);
        &self.accepted[self.accepted.len() - 1]
    }

    pub fn finish(self) -> (Vec<Schedule>, SearchStats) {
        (self.accepted, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_unplace_restore_state() {
        let a = Section::from_time_text("a", "A", 3, 4, "월1,2");
        let b = Section::from_time_text("b", "B", 2, 1, "화1,2");
        let mut state = SearchState::new(2);

        state.place(&a, 0, true);
        state.place(&b, 1, false);
        assert_eq!(state.total_credits, 5);
        assert_eq!(state.exact_tier_credits, 3);
        assert!(state.is_taken(0) && state.is_taken(1));

        state.unplace(&b, 1, false);
        state.unplace(&a, 0, true);
        assert_eq!(state.total_credits, 0);
        assert_eq!(state.exact_tier_credits, 0);
        assert!(state.selection.is_empty());
        assert!(!state.is_taken(0));
    }

    #[test]
    fn test_accept_snapshots_selection() {
        let a = Section::from_time_text("a", "A", 3, 1, "월1,2");
        let mut state = SearchState::new(1);
        state.place(&a, 0, false);

        let credits = state.accept().total_credits;
        assert_eq!(credits, 3);

        state.unplace(&a, 0, false);
        let (accepted, stats) = state.finish();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].sections[0].id, "a");
        assert_eq!(stats.accepted, 1);
    }
}
