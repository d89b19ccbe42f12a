//! Catalogue filtering and ordering of candidate sections.
//!
//! Choices are accepted both as English keywords and as the Korean labels the
//! host application's forms submit ("전체", "유", "무", "웹강", "일반", ...).

use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Credit, Section};

/// Errors from parsing filter choices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown presence choice: {0}")]
    UnknownPresence(String),
    #[error("Unknown delivery choice: {0}")]
    UnknownDelivery(String),
    #[error("Unknown section order: {0}")]
    UnknownOrder(String),
}

fn is_any(s: &str) -> bool {
    matches!(s.trim(), "" | "all" | "any" | "전체")
}

/// Whether a weighted component (assignments, quizzes) must be present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presence {
    #[default]
    Any,
    With,
    Without,
}

impl Presence {
    fn admits(self, pct: f64) -> bool {
        match self {
            Presence::Any => true,
            Presence::With => pct > 0.0,
            Presence::Without => pct <= 0.0,
        }
    }
}

impl FromStr for Presence {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            _ if is_any(s) => Ok(Presence::Any),
            "with" | "yes" | "유" => Ok(Presence::With),
            "without" | "no" | "무" => Ok(Presence::Without),
            other => Err(FilterError::UnknownPresence(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delivery {
    #[default]
    Any,
    Online,
    InPerson,
}

impl FromStr for Delivery {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            _ if is_any(s) => Ok(Delivery::Any),
            "online" | "웹강" => Ok(Delivery::Online),
            "in-person" | "offline" | "일반" => Ok(Delivery::InPerson),
            other => Err(FilterError::UnknownDelivery(other.to_string())),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SectionOrder {
    /// By course id, then section id
    #[default]
    Default,
    /// By assignment weight, then section id
    FewestAssignments,
    /// By quiz weight, then section id
    FewestQuizzes,
}

impl FromStr for SectionOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" | "기본순" => Ok(SectionOrder::Default),
            "fewest-assignments" | "과제 적은순" => Ok(SectionOrder::FewestAssignments),
            "fewest-quizzes" | "퀴즈 적은순" => Ok(SectionOrder::FewestQuizzes),
            other => Err(FilterError::UnknownOrder(other.to_string())),
        }
    }
}

/// Conjunction of catalogue predicates. The default admits every section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionFilter {
    /// Exact evaluation type (None = any)
    pub eval_type: Option<String>,
    pub assignments: Presence,
    pub quizzes: Presence,
    /// Exact credit value (None = any)
    pub credit: Option<Credit>,
    pub delivery: Delivery,
}

impl SectionFilter {
    /// Build a filter from form-style string choices.
    pub fn from_choices(
        eval_type: &str,
        assignments: &str,
        quizzes: &str,
        credit: Option<Credit>,
        delivery: &str,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            eval_type: (!is_any(eval_type)).then(|| eval_type.trim().to_string()),
            assignments: assignments.parse()?,
            quizzes: quizzes.parse()?,
            credit,
            delivery: delivery.parse()?,
        })
    }

    pub fn admits(&self, section: &Section) -> bool {
        if let Some(eval_type) = &self.eval_type {
            if section.eval_type != *eval_type {
                return false;
            }
        }
        if !self.assignments.admits(section.assignment_pct) {
            return false;
        }
        if !self.quizzes.admits(section.quiz_pct) {
            return false;
        }
        if let Some(credit) = self.credit {
            if section.credit != credit {
                return false;
            }
        }
        match self.delivery {
            Delivery::Any => true,
            Delivery::Online => section.is_online,
            Delivery::InPerson => !section.is_online,
        }
    }
}

/// Compare f64 values for sorting, treating NaN as equal to everything.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sections admitted by `filter`, in `order`.
pub fn filter_sections(
    sections: &[Section],
    filter: &SectionFilter,
    order: SectionOrder,
) -> Vec<Section> {
    let mut kept: Vec<Section> = sections
        .iter()
        .filter(|s| filter.admits(s))
        .cloned()
        .collect();

    match order {
        SectionOrder::Default => {
            kept.sort_by(|a, b| a.course_id.cmp(&b.course_id).then_with(|| a.id.cmp(&b.id)))
        }
        SectionOrder::FewestAssignments => kept.sort_by(|a, b| {
            cmp_f64(a.assignment_pct, b.assignment_pct).then_with(|| a.id.cmp(&b.id))
        }),
        SectionOrder::FewestQuizzes => kept
            .sort_by(|a, b| cmp_f64(a.quiz_pct, b.quiz_pct).then_with(|| a.id.cmp(&b.id))),
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<Section> {
        vec![
            Section::from_time_text("c-01", "C", 3, 5, "월1,2").with_evaluation("상대평가", 20.0, 0.0),
            Section::from_time_text("a-02", "A", 2, 5, "웹강의").with_evaluation("절대평가", 0.0, 10.0),
            Section::from_time_text("a-01", "A", 3, 5, "화1,2").with_evaluation("상대평가", 10.0, 5.0),
            Section::from_time_text("b-01", "B", 3, 5, "수1,2").with_evaluation("절대평가", 0.0, 0.0),
        ]
    }

    fn ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_default_admits_all_in_course_order() {
        let out = filter_sections(&catalogue(), &SectionFilter::default(), SectionOrder::Default);
        assert_eq!(ids(&out), vec!["a-01", "a-02", "b-01", "c-01"]);
    }

    #[test]
    fn test_filter_by_eval_type_and_presence() {
        let filter = SectionFilter::from_choices("절대평가", "무", "전체", None, "all").unwrap();
        let out = filter_sections(&catalogue(), &filter, SectionOrder::Default);
        assert_eq!(ids(&out), vec!["a-02", "b-01"]);

        let filter = SectionFilter::from_choices("all", "all", "with", None, "all").unwrap();
        let out = filter_sections(&catalogue(), &filter, SectionOrder::Default);
        assert_eq!(ids(&out), vec!["a-01", "a-02"]);
    }

    #[test]
    fn test_filter_by_credit_and_delivery() {
        let filter = SectionFilter::from_choices("", "", "", Some(3), "일반").unwrap();
        let out = filter_sections(&catalogue(), &filter, SectionOrder::Default);
        assert_eq!(ids(&out), vec!["a-01", "b-01", "c-01"]);

        let filter = SectionFilter::from_choices("", "", "", None, "웹강").unwrap();
        let out = filter_sections(&catalogue(), &filter, SectionOrder::Default);
        assert_eq!(ids(&out), vec!["a-02"]);
    }

    #[test]
    fn test_sort_by_fewest_assignments_and_quizzes() {
        let all = SectionFilter::default();
        let out = filter_sections(&catalogue(), &all, SectionOrder::FewestAssignments);
        assert_eq!(ids(&out), vec!["a-02", "b-01", "a-01", "c-01"]);

        let out = filter_sections(&catalogue(), &all, "퀴즈 적은순".parse().unwrap());
        assert_eq!(ids(&out), vec!["b-01", "c-01", "a-01", "a-02"]);
    }

    #[test]
    fn test_unknown_choices_rejected() {
        assert_eq!(
            "maybe".parse::<Presence>(),
            Err(FilterError::UnknownPresence("maybe".to_string()))
        );
        assert!("hybrid".parse::<Delivery>().is_err());
        assert!("random".parse::<SectionOrder>().is_err());
    }
}
