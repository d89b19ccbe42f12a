//! Core data types for the timetable search.

use chrono::NaiveTime;
use pyo3::prelude::*;
use std::collections::BTreeMap;

use crate::timetable::{parse_meeting_text, slot_end_time, slot_start_time};

/// Priority tier of a course category. Lower numbers are searched first.
pub type Tier = u32;

/// Credit value. Signed so that negative input can be rejected at the boundary.
pub type Credit = i32;

pub const TIER_MAJOR_REQUIRED: Tier = 1;
pub const TIER_MAJOR_ELECTIVE: Tier = 2;
pub const TIER_FOCUS_ELECTIVE: Tier = 3;
pub const TIER_CORE_ELECTIVE: Tier = 4;
pub const TIER_GENERAL_ELECTIVE: Tier = 5;

/// Tiers counted by the ranker, in tie-break order.
pub const RANKED_TIERS: [Tier; 5] = [
    TIER_MAJOR_REQUIRED,
    TIER_MAJOR_ELECTIVE,
    TIER_FOCUS_ELECTIVE,
    TIER_CORE_ELECTIVE,
    TIER_GENERAL_ELECTIVE,
];

/// Human-readable name of a well-known tier.
pub fn tier_label(tier: Tier) -> Option<&'static str> {
    match tier {
        TIER_MAJOR_REQUIRED => Some("major-required"),
        TIER_MAJOR_ELECTIVE => Some("major-elective"),
        TIER_FOCUS_ELECTIVE => Some("focus-elective"),
        TIER_CORE_ELECTIVE => Some("core-elective"),
        TIER_GENERAL_ELECTIVE => Some("general-elective"),
        _ => None,
    }
}

/// Sum of section credits, saturating at the `Credit` bounds.
pub fn sum_credits<'a, I>(sections: I) -> Credit
where
    I: IntoIterator<Item = &'a Section>,
{
    sections
        .into_iter()
        .fold(0, |total: Credit, s| total.saturating_add(s.credit))
}

/// A contiguous block of 30-minute periods on one weekday.
///
/// `end_period` is exclusive: periods 3,4,5 become `[3, 6)`.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeetingInterval {
    /// 0 = Monday .. 5 = Saturday
    #[pyo3(get, set)]
    pub day: u8,
    #[pyo3(get, set)]
    pub start_period: u32,
    #[pyo3(get, set)]
    pub end_period: u32,
    #[pyo3(get, set)]
    pub room: String,
}

impl MeetingInterval {
    /// True if both intervals are on the same day and their half-open ranges intersect.
    #[inline]
    pub fn overlaps(&self, other: &MeetingInterval) -> bool {
        self.day == other.day
            && !(self.end_period <= other.start_period || other.end_period <= self.start_period)
    }
}

#[pymethods]
impl MeetingInterval {
    #[new]
    #[pyo3(signature = (day, start_period, end_period, room=String::new()))]
    fn new(day: u8, start_period: u32, end_period: u32, room: String) -> Self {
        Self {
            day,
            start_period,
            end_period,
            room,
        }
    }

    /// Wall-clock start of the first period.
    pub fn start_time(&self) -> Option<NaiveTime> {
        slot_start_time(self.start_period)
    }

    /// Wall-clock end of the last occupied period.
    pub fn end_time(&self) -> Option<NaiveTime> {
        // end_period is exclusive, so the block ends where the previous slot ends
        self.end_period.checked_sub(1).and_then(slot_end_time)
    }

    fn __repr__(&self) -> String {
        format!(
            "MeetingInterval(day={}, periods={}..{}, room={:?})",
            self.day, self.start_period, self.end_period, self.room
        )
    }
}

/// One offering of a course.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// Unique per offering (catalog file id in the host application)
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub course_id: String,
    #[pyo3(get, set)]
    pub course_name: String,
    #[pyo3(get, set)]
    pub instructor: String,
    #[pyo3(get, set)]
    pub credit: Credit,
    #[pyo3(get, set)]
    pub meetings: Vec<MeetingInterval>,
    /// Online / no fixed time; such a section carries no meetings
    #[pyo3(get, set)]
    pub is_online: bool,
    #[pyo3(get, set)]
    pub tier: Tier,
    /// Raw schedule text the meetings were parsed from
    #[pyo3(get, set)]
    pub time_text: String,
    /// Grading scheme label, e.g. relative or absolute evaluation
    #[pyo3(get, set)]
    pub eval_type: String,
    #[pyo3(get, set)]
    pub assignment_pct: f64,
    #[pyo3(get, set)]
    pub quiz_pct: f64,
}

impl Section {
    /// Build a section from a raw catalog schedule string.
    pub fn from_time_text(
        id: impl Into<String>,
        course_id: impl Into<String>,
        credit: Credit,
        tier: Tier,
        time_text: &str,
    ) -> Self {
        let (is_online, meetings) = parse_meeting_text(time_text);
        Self {
            id: id.into(),
            course_id: course_id.into(),
            course_name: String::new(),
            instructor: String::new(),
            credit,
            meetings,
            is_online,
            tier,
            time_text: time_text.to_string(),
            eval_type: String::new(),
            assignment_pct: 0.0,
            quiz_pct: 0.0,
        }
    }

    pub fn with_course_name(mut self, course_name: impl Into<String>) -> Self {
        self.course_name = course_name.into();
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_evaluation(
        mut self,
        eval_type: impl Into<String>,
        assignment_pct: f64,
        quiz_pct: f64,
    ) -> Self {
        self.eval_type = eval_type.into();
        self.assignment_pct = assignment_pct;
        self.quiz_pct = quiz_pct;
        self
    }
}

#[pymethods]
impl Section {
    #[new]
    #[pyo3(signature = (
        id,
        course_id,
        credit,
        tier,
        time_text=String::new(),
        course_name=String::new(),
        instructor=String::new(),
        eval_type=String::new(),
        assignment_pct=0.0,
        quiz_pct=0.0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        course_id: String,
        credit: Credit,
        tier: Tier,
        time_text: String,
        course_name: String,
        instructor: String,
        eval_type: String,
        assignment_pct: f64,
        quiz_pct: f64,
    ) -> Self {
        Self::from_time_text(id, course_id, credit, tier, &time_text)
            .with_course_name(course_name)
            .with_instructor(instructor)
            .with_evaluation(eval_type, assignment_pct, quiz_pct)
    }

    fn __repr__(&self) -> String {
        format!(
            "Section(id={:?}, course_id={:?}, credit={}, tier={}, meetings={}, online={})",
            self.id,
            self.course_id,
            self.credit,
            self.tier,
            self.meetings.len(),
            self.is_online
        )
    }
}

/// A conflict-free, one-section-per-course selection.
///
/// The per-tier breakdown is derived from `sections` when the schedule is built
/// and never updated afterwards.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    #[pyo3(get)]
    pub sections: Vec<Section>,
    #[pyo3(get)]
    pub total_credits: Credit,
    /// tier -> summed credits of the sections tagged with it
    #[pyo3(get)]
    pub tier_credits: BTreeMap<Tier, Credit>,
    /// tier -> number of sections tagged with it
    #[pyo3(get)]
    pub tier_counts: BTreeMap<Tier, usize>,
}

impl Schedule {
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut tier_credits: BTreeMap<Tier, Credit> = BTreeMap::new();
        let mut tier_counts: BTreeMap<Tier, usize> = BTreeMap::new();
        for section in &sections {
            let credits = tier_credits.entry(section.tier).or_insert(0);
            *credits = credits.saturating_add(section.credit);
            *tier_counts.entry(section.tier).or_insert(0) += 1;
        }
        let total_credits = sum_credits(sections.iter());
        Self {
            sections,
            total_credits,
            tier_credits,
            tier_counts,
        }
    }
}

#[pymethods]
impl Schedule {
    #[new]
    fn new(sections: Vec<Section>) -> Self {
        Self::from_sections(sections)
    }

    /// Number of sections from `tier` (0 if none).
    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    /// Credits contributed by `tier` (0 if none).
    pub fn tier_credit(&self, tier: Tier) -> Credit {
        self.tier_credits.get(&tier).copied().unwrap_or(0)
    }

    /// Credits keyed by tier label; unlabeled tiers are keyed by number.
    pub fn credits_by_label(&self) -> BTreeMap<String, Credit> {
        self.tier_credits
            .iter()
            .map(|(&tier, &credits)| {
                let label = tier_label(tier)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("tier-{}", tier));
                (label, credits)
            })
            .collect()
    }

    pub fn course_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.course_id.clone()).collect()
    }

    fn __len__(&self) -> usize {
        self.sections.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Schedule(sections={}, total_credits={}, tier_credits={:?})",
            self.sections.len(),
            self.total_credits,
            self.tier_credits
        )
    }
}
