//! Tier grouping: tier -> course -> alternative sections.
//!
//! Alternative sections of one course are mutually exclusive choices, so the
//! search walks courses, not sections. The index is rebuilt on every search
//! call and owns its sections for the duration of that call.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::interner::{CourseInterner, CourseKey};
use crate::models::{Section, Tier};

/// Input that breaks the section invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupingError {
    #[error("Duplicate section id {section_id:?} in course {course_id:?} (tier {tier})")]
    DuplicateSectionId {
        tier: Tier,
        course_id: String,
        section_id: String,
    },
    #[error("Online section {0:?} carries meeting times")]
    OnlineWithMeetings(String),
    #[error("Section {section_id:?} has negative credit {credit}")]
    NegativeCredit { section_id: String, credit: i32 },
    #[error("Section {section_id:?} is tagged tier {tagged} but listed under tier {listed}")]
    TierMismatch {
        section_id: String,
        tagged: Tier,
        listed: Tier,
    },
}

/// All alternative sections of one course within one tier, sorted by section id.
#[derive(Clone, Debug)]
pub struct CourseGroup {
    pub course_id: String,
    pub key: CourseKey,
    pub sections: Vec<Section>,
}

/// Courses of one tier, in course id order.
#[derive(Clone, Debug)]
pub struct TierGroup {
    pub tier: Tier,
    pub courses: Vec<CourseGroup>,
}

impl TierGroup {
    pub fn section_count(&self) -> usize {
        self.courses.iter().map(|c| c.sections.len()).sum()
    }
}

/// Non-empty tiers in ascending order (highest priority first).
#[derive(Clone, Debug, Default)]
pub struct TierGroups {
    pub tiers: Vec<TierGroup>,
    interner: CourseInterner,
}

/// Partition a flat pool of sections by their tier tag, keeping input order.
pub fn partition_by_tier(sections: Vec<Section>) -> BTreeMap<Tier, Vec<Section>> {
    let mut by_tier: BTreeMap<Tier, Vec<Section>> = BTreeMap::new();
    for section in sections {
        by_tier.entry(section.tier).or_default().push(section);
    }
    by_tier
}

impl TierGroups {
    /// Group a caller-supplied tier map. Tiers with no sections are dropped.
    pub fn from_tier_map(tiers: BTreeMap<Tier, Vec<Section>>) -> Result<Self, GroupingError> {
        let course_estimate: usize = tiers.values().map(Vec::len).sum();
        let mut interner = CourseInterner::with_capacity(course_estimate);
        let mut groups: Vec<TierGroup> = Vec::with_capacity(tiers.len());

        for (tier, sections) in tiers {
            if sections.is_empty() {
                continue;
            }

            let mut by_course: BTreeMap<String, Vec<Section>> = BTreeMap::new();
            for section in sections {
                check_section(tier, &section)?;
                by_course
                    .entry(section.course_id.clone())
                    .or_default()
                    .push(section);
            }

            let mut courses: Vec<CourseGroup> = Vec::with_capacity(by_course.len());
            for (course_id, mut sections) in by_course {
                sections.sort_by(|a, b| a.id.cmp(&b.id));
                if let Some(pair) = sections.windows(2).find(|w| w[0].id == w[1].id) {
                    return Err(GroupingError::DuplicateSectionId {
                        tier,
                        course_id,
                        section_id: pair[0].id.clone(),
                    });
                }
                let key = interner.intern(&course_id);
                courses.push(CourseGroup {
                    course_id,
                    key,
                    sections,
                });
            }

            groups.push(TierGroup { tier, courses });
        }

        Ok(Self {
            tiers: groups,
            interner,
        })
    }

    /// Tier numbers present, ascending.
    pub fn tier_numbers(&self) -> Vec<Tier> {
        self.tiers.iter().map(|t| t.tier).collect()
    }

    /// Drop tiers for which `keep` returns false.
    pub fn retain_tiers<F>(&mut self, mut keep: F)
    where
        F: FnMut(Tier) -> bool,
    {
        self.tiers.retain(|t| keep(t.tier));
    }

    /// Number of distinct course ids across all tiers.
    pub fn distinct_courses(&self) -> usize {
        self.interner.len()
    }
}

fn check_section(tier: Tier, section: &Section) -> Result<(), GroupingError> {
    if section.tier != tier {
        return Err(GroupingError::TierMismatch {
            section_id: section.id.clone(),
            tagged: section.tier,
            listed: tier,
        });
    }
    if section.is_online && !section.meetings.is_empty() {
        return Err(GroupingError::OnlineWithMeetings(section.id.clone()));
    }
    if section.credit < 0 {
        return Err(GroupingError::NegativeCredit {
            section_id: section.id.clone(),
            credit: section.credit,
        });
    }
    Ok(())
}
