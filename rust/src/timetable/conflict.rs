//! Time-conflict detection between sections.

use pyo3::prelude::*;

use crate::models::Section;

/// True if `a` and `b` meet on the same day in overlapping periods.
///
/// Online sections never conflict with anything, including each other.
pub fn conflicts(a: &Section, b: &Section) -> bool {
    if a.is_online || b.is_online {
        return false;
    }
    a.meetings
        .iter()
        .any(|ma| b.meetings.iter().any(|mb| ma.overlaps(mb)))
}

/// True if `candidate` conflicts with none of `current`.
pub fn can_place<'a, I>(current: I, candidate: &Section) -> bool
where
    I: IntoIterator<Item = &'a Section>,
{
    current.into_iter().all(|placed| !conflicts(placed, candidate))
}

/// One overlapping pair of meetings, for reporting.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictDetail {
    #[pyo3(get)]
    pub first_section_id: String,
    #[pyo3(get)]
    pub first_course_id: String,
    #[pyo3(get)]
    pub second_section_id: String,
    #[pyo3(get)]
    pub second_course_id: String,
    #[pyo3(get)]
    pub day: u8,
    /// Periods occupied by both sections
    #[pyo3(get)]
    pub periods: Vec<u32>,
}

#[pymethods]
impl ConflictDetail {
    fn __repr__(&self) -> String {
        format!(
            "ConflictDetail({:?} x {:?}, day={}, periods={:?})",
            self.first_course_id, self.second_course_id, self.day, self.periods
        )
    }
}

/// Every overlapping meeting pair among `sections`, in input order.
pub fn conflict_details(sections: &[Section]) -> Vec<ConflictDetail> {
    let mut details = Vec::new();

    for (i, a) in sections.iter().enumerate() {
        if a.is_online {
            continue;
        }
        for b in sections.iter().skip(i + 1).filter(|b| !b.is_online) {
            for ma in &a.meetings {
                for mb in b.meetings.iter().filter(|mb| ma.overlaps(mb)) {
                    let start = ma.start_period.max(mb.start_period);
                    let end = ma.end_period.min(mb.end_period);
                    details.push(ConflictDetail {
                        first_section_id: a.id.clone(),
                        first_course_id: a.course_id.clone(),
                        second_section_id: b.id.clone(),
                        second_course_id: b.course_id.clone(),
                        day: ma.day,
                        periods: (start..end).collect(),
                    });
                }
            }
        }
    }

    details
}
