//! Core schedule search implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::grouping::{GroupingError, TierGroup, TierGroups};
use crate::models::{Credit, Schedule, Section, Tier};
use crate::ranking::rank_schedules;
use crate::timetable::can_place;
use crate::{log_changes, log_checks, log_debug};

use super::state::SearchState;
use super::stats::SearchOutcome;

/// Errors raised before the search starts. Infeasibility is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid section: {0}")]
    InvalidSection(GroupingError),
}

impl From<GroupingError> for SearchError {
    fn from(err: GroupingError) -> Self {
        SearchError::InvalidSection(err)
    }
}

/// Depth-first search over tiers, then courses, then alternative sections.
///
/// Holds only the immutable tier index and configuration; every `run` builds
/// its own accumulator, so one instance can serve repeated or concurrent runs.
pub struct ScheduleSearch {
    groups: TierGroups,
    config: SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl ScheduleSearch {
    /// Validate the configuration and index the sections.
    pub fn new(
        tiers: BTreeMap<Tier, Vec<Section>>,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let mut groups = TierGroups::from_tier_map(tiers)?;
        groups.retain_tiers(|tier| config.includes_tier(tier));

        Ok(Self {
            groups,
            config,
            cancel: None,
        })
    }

    /// Stop early (keeping what was accepted so far) once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn groups(&self) -> &TierGroups {
        &self.groups
    }

    /// Run the search and rank the accepted schedules.
    pub fn run(&self) -> SearchOutcome {
        let verbosity = self.config.verbosity;
        log_changes!(
            verbosity,
            "Search: tiers={:?} courses={} target={} exact={:?} cap={}",
            self.groups.tier_numbers(),
            self.groups.distinct_courses(),
            self.config.target_credits,
            self.config.tier_credit_exact,
            self.config.result_cap
        );
        for group in &self.groups.tiers {
            log_checks!(
                verbosity,
                "  Tier {}: {} courses, {} sections",
                group.tier,
                group.courses.len(),
                group.section_count()
            );
        }

        let mut state = SearchState::new(self.groups.distinct_courses());
        self.visit_tier(0, &mut state);
        let (accepted, stats) = state.finish();

        log_changes!(
            verbosity,
            "Search finished: {} accepted, {} nodes, cap_reached={}, cancelled={}",
            stats.accepted,
            stats.nodes_visited,
            stats.cap_reached,
            stats.cancelled
        );

        SearchOutcome {
            schedules: rank_schedules(accepted),
            stats,
        }
    }

    /// Highest running total a branch may reach before it is cut.
    #[inline]
    fn credit_ceiling(&self) -> Credit {
        self.config
            .target_credits
            .saturating_add(self.config.credit_slack)
    }

    fn exact_tier(&self) -> Option<Tier> {
        self.config.tier_credit_exact.map(|(tier, _)| tier)
    }

    /// True if the search as a whole must stop.
    fn should_stop(&self, state: &mut SearchState<'_>) -> bool {
        if state.accepted.len() >= self.config.result_cap {
            state.stats.cap_reached = true;
            return true;
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                state.stats.cancelled = true;
                return true;
            }
        }
        false
    }

    fn visit_tier<'a>(&'a self, tier_idx: usize, state: &mut SearchState<'a>) {
        if self.should_stop(state) {
            return;
        }
        state.stats.nodes_visited += 1;

        match self.groups.tiers.get(tier_idx) {
            Some(group) => self.visit_course(group, tier_idx, 0, state),
            None => self.evaluate_leaf(state),
        }
    }

    fn visit_course<'a>(
        &'a self,
        group: &'a TierGroup,
        tier_idx: usize,
        course_idx: usize,
        state: &mut SearchState<'a>,
    ) {
        if self.should_stop(state) {
            return;
        }
        state.stats.nodes_visited += 1;

        let Some(course) = group.courses.get(course_idx) else {
            self.visit_tier(tier_idx + 1, state);
            return;
        };

        // Branch 1: leave this course out
        self.visit_course(group, tier_idx, course_idx + 1, state);

        if state.is_taken(course.key) {
            return;
        }

        let verbosity = self.config.verbosity;
        let counts_for_exact = self.exact_tier() == Some(group.tier);

        // Branch 2..n: take one of its sections
        for section in &course.sections {
            if self.should_stop(state) {
                return;
            }

            if !can_place(state.selection.iter().copied(), section) {
                state.stats.rejected_conflict += 1;
                log_debug!(verbosity, "    Conflict: {} ({})", section.id, course.course_id);
                continue;
            }

            // Running totals never exceed their bounds, so an overflowing add
            // is over the bound as well.
            let next_total = match state.total_credits.checked_add(section.credit) {
                Some(total) if total <= self.credit_ceiling() => total,
                _ => {
                    state.stats.pruned_over_credit += 1;
                    log_checks!(
                        verbosity,
                        "    Pruned: {} + {} > ceiling {}",
                        state.total_credits,
                        section.credit,
                        self.credit_ceiling()
                    );
                    continue;
                }
            };

            if counts_for_exact {
                if let Some((tier, exact)) = self.config.tier_credit_exact {
                    let overflows = state
                        .exact_tier_credits
                        .checked_add(section.credit)
                        .map_or(true, |sub| sub > exact);
                    if overflows {
                        state.stats.rejected_exact_tier += 1;
                        log_debug!(
                            verbosity,
                            "    Tier {} overflow: {} + {} > {}",
                            tier,
                            state.exact_tier_credits,
                            section.credit,
                            exact
                        );
                        continue;
                    }
                }
            }

            log_debug!(
                verbosity,
                "    Place {} ({}) tier={} credit={} total={}",
                section.id,
                course.course_id,
                group.tier,
                section.credit,
                next_total
            );
            state.place(section, course.key, counts_for_exact);
            self.visit_course(group, tier_idx, course_idx + 1, state);
            state.unplace(section, course.key, counts_for_exact);
        }
    }

    /// Past the last tier: accept iff every credit target is met exactly.
    fn evaluate_leaf(&self, state: &mut SearchState<'_>) {
        let verbosity = self.config.verbosity;

        if let Some((tier, exact)) = self.config.tier_credit_exact {
            if state.exact_tier_credits != exact {
                state.stats.rejected_leaves += 1;
                log_checks!(
                    verbosity,
                    "  Rejected: tier {} credits {} != {} (total={})",
                    tier,
                    state.exact_tier_credits,
                    exact,
                    state.total_credits
                );
                return;
            }
        }

        if state.total_credits != self.config.target_credits {
            state.stats.rejected_leaves += 1;
            log_checks!(
                verbosity,
                "  Rejected: total credits {} != {}",
                state.total_credits,
                self.config.target_credits
            );
            return;
        }

        let schedule = state.accept();
        log_changes!(
            verbosity,
            "  Accepted: credits={} courses={:?}",
            schedule.total_credits,
            schedule.course_ids()
        );
    }
}

/// Search with default slack and no tier filter.
///
/// Returns ranked schedules; an empty list means no combination satisfies
/// the targets.
pub fn search(
    tiers: BTreeMap<Tier, Vec<Section>>,
    target_credits: Credit,
    tier_credit_exact: Option<(Tier, Credit)>,
    result_cap: usize,
) -> Result<Vec<Schedule>, SearchError> {
    let config = SearchConfig::new(target_credits, tier_credit_exact, result_cap);
    Ok(ScheduleSearch::new(tiers, config)?.run().schedules)
}
