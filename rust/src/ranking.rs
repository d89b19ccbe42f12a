//! Ordering of accepted schedules.
//!
//! Schedules that fill higher-priority tiers with more courses come first;
//! among equals the heavier credit load wins. The sort is stable, so fully
//! tied schedules keep their discovery order.

use std::cmp::Reverse;

use crate::models::{Credit, Schedule, RANKED_TIERS};

/// Sort key for schedule ranking.
///
/// Derives `Ord` field by field: per-tier section counts (tier 1 first), then
/// total credits. Larger keys rank earlier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub tier_counts: [usize; RANKED_TIERS.len()],
    pub total_credits: Credit,
}

impl RankKey {
    pub fn of(schedule: &Schedule) -> Self {
        let mut tier_counts = [0; RANKED_TIERS.len()];
        for (slot, &tier) in tier_counts.iter_mut().zip(RANKED_TIERS.iter()) {
            *slot = schedule.tier_count(tier);
        }
        Self {
            tier_counts,
            total_credits: schedule.total_credits,
        }
    }
}

/// Rank schedules best-first.
pub fn rank_schedules(mut schedules: Vec<Schedule>) -> Vec<Schedule> {
    schedules.sort_by_cached_key(|s| Reverse(RankKey::of(s)));
    schedules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, Tier};

    fn schedule(parts: &[(&str, Tier, Credit)]) -> Schedule {
        let sections = parts
            .iter()
            .map(|&(id, tier, credit)| Section::from_time_text(id, id, credit, tier, ""))
            .collect();
        Schedule::from_sections(sections)
    }

    fn first_ids(ranked: &[Schedule]) -> Vec<String> {
        ranked.iter().map(|s| s.sections[0].id.clone()).collect()
    }

    #[test]
    fn test_rank_key_counts_per_tier() {
        let s = schedule(&[("a", 1, 3), ("b", 1, 3), ("c", 4, 2), ("d", 9, 1)]);
        let key = RankKey::of(&s);
        assert_eq!(key.tier_counts, [2, 0, 0, 1, 0]);
        assert_eq!(key.total_credits, 9);
    }

    #[test]
    fn test_higher_tier_beats_more_lower_tier_courses() {
        let many_low = schedule(&[("low", 5, 1), ("low2", 5, 1), ("low3", 5, 1)]);
        let one_high = schedule(&[("high", 1, 3)]);
        let ranked = rank_schedules(vec![many_low, one_high]);
        assert_eq!(first_ids(&ranked), vec!["high", "low"]);
    }

    #[test]
    fn test_ties_left_to_right_across_tiers() {
        let a = schedule(&[("a", 1, 3), ("a2", 3, 3)]);
        let b = schedule(&[("b", 1, 3), ("b2", 2, 3)]);
        let ranked = rank_schedules(vec![a, b]);
        assert_eq!(first_ids(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn test_credits_break_count_ties() {
        let light = schedule(&[("light", 2, 2)]);
        let heavy = schedule(&[("heavy", 2, 3)]);
        let ranked = rank_schedules(vec![light, heavy]);
        assert_eq!(first_ids(&ranked), vec!["heavy", "light"]);
    }

    #[test]
    fn test_full_ties_keep_discovery_order() {
        let first = schedule(&[("first", 3, 3)]);
        let second = schedule(&[("second", 3, 3)]);
        let ranked = rank_schedules(vec![first, second]);
        assert_eq!(first_ids(&ranked), vec!["first", "second"]);
    }
}
