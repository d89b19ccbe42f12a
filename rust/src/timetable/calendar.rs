//! Per-weekday blocks for rendering a timetable grid.

use chrono::NaiveTime;
use pyo3::prelude::*;
use std::collections::BTreeMap;

use crate::models::Section;

use super::parser::{day_name, slot_end_time, slot_start_time};

/// One meeting of one section, positioned on the weekly grid.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarBlock {
    #[pyo3(get)]
    pub day: u8,
    #[pyo3(get)]
    pub start_period: u32,
    #[pyo3(get)]
    pub end_period: u32,
    #[pyo3(get)]
    pub start: Option<NaiveTime>,
    #[pyo3(get)]
    pub end: Option<NaiveTime>,
    #[pyo3(get)]
    pub section_id: String,
    #[pyo3(get)]
    pub course_id: String,
    #[pyo3(get)]
    pub course_name: String,
    #[pyo3(get)]
    pub instructor: String,
    #[pyo3(get)]
    pub room: String,
}

#[pymethods]
impl CalendarBlock {
    fn __repr__(&self) -> String {
        format!(
            "CalendarBlock({} {:?}-{:?}, course_id={:?}, room={:?})",
            day_name(self.day).unwrap_or("?"),
            self.start,
            self.end,
            self.course_id,
            self.room
        )
    }
}

/// Lay out the meetings of `sections` per weekday, ordered by start period.
///
/// Online sections have no meetings and contribute no blocks.
pub fn calendar_blocks(sections: &[Section]) -> BTreeMap<u8, Vec<CalendarBlock>> {
    let mut days: BTreeMap<u8, Vec<CalendarBlock>> = BTreeMap::new();

    for section in sections.iter().filter(|s| !s.is_online) {
        for meeting in &section.meetings {
            days.entry(meeting.day).or_default().push(CalendarBlock {
                day: meeting.day,
                start_period: meeting.start_period,
                end_period: meeting.end_period,
                start: slot_start_time(meeting.start_period),
                end: meeting.end_period.checked_sub(1).and_then(slot_end_time),
                section_id: section.id.clone(),
                course_id: section.course_id.clone(),
                course_name: section.course_name.clone(),
                instructor: section.instructor.clone(),
                room: meeting.room.clone(),
            });
        }
    }

    for blocks in days.values_mut() {
        blocks.sort_by(|a, b| {
            (a.start_period, a.end_period, &a.course_id)
                .cmp(&(b.start_period, b.end_period, &b.course_id))
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_grouped_and_sorted() {
        let sections = vec![
            Section::from_time_text("b-01", "B", 3, 2, "월7,8,9:B-1").with_instructor("Lee"),
            Section::from_time_text("a-01", "A", 3, 1, "월1,2,수1,2:A-1").with_instructor("Kim"),
            Section::from_time_text("w-01", "W", 2, 5, "웹강의"),
        ];

        let days = calendar_blocks(&sections);
        assert_eq!(days.len(), 2);

        let monday = &days[&0];
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].course_id, "A");
        assert_eq!(monday[0].start, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(monday[0].end, NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(monday[1].course_id, "B");
        assert_eq!(monday[1].instructor, "Lee");
        assert_eq!(monday[1].room, "B-1");

        let wednesday = &days[&2];
        assert_eq!(wednesday.len(), 1);
        assert_eq!(wednesday[0].section_id, "a-01");
    }

    #[test]
    fn test_online_only_has_no_blocks() {
        let sections = vec![Section::from_time_text("w-01", "W", 2, 5, "")];
        assert!(calendar_blocks(&sections).is_empty());
    }
}
