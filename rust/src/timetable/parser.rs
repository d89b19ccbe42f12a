//! Parser for catalog schedule text.
//!
//! Catalog entries describe a weekly schedule as day glyphs followed by
//! comma-separated period numbers, with ':'-separated room labels:
//!
//! - `"월1,2,3"` -> Monday periods 1..=3
//! - `"월13,14,15,수16,17:하-232"` -> two meetings in room 하-232
//! - `"웹강의"` -> online, no fixed time
//!
//! Parsing is fail-open: malformed tokens are dropped, never reported.

use chrono::NaiveTime;

use crate::models::MeetingInterval;

/// Substrings that mark an offering as online / without fixed meeting times.
pub const ONLINE_SENTINELS: [&str; 2] = ["웹강의", "온라인"];

/// Day glyphs in day-index order (0 = Monday).
const DAY_GLYPHS: [char; 6] = ['월', '화', '수', '목', '금', '토'];
const DAY_NAMES: [&str; 6] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Period 1 starts at 09:00.
pub const SLOT_START_HOUR: u32 = 9;
/// Length of one period.
pub const SLOT_MINUTES: u32 = 30;

const ROOM_SEPARATOR: char = ':';

/// Day index for a day glyph.
#[inline]
pub fn day_index(glyph: char) -> Option<u8> {
    DAY_GLYPHS
        .iter()
        .position(|&g| g == glyph)
        .map(|idx| idx as u8)
}

/// Short English weekday name for a day index.
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(day as usize).copied()
}

/// Wall-clock start of a period (`None` for period 0 or past midnight).
pub fn slot_start_time(slot: u32) -> Option<NaiveTime> {
    let offset = slot.checked_sub(1)?.checked_mul(SLOT_MINUTES)?;
    let minutes = (SLOT_START_HOUR * 60).checked_add(offset)?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Wall-clock end of a period.
pub fn slot_end_time(slot: u32) -> Option<NaiveTime> {
    slot_start_time(slot.checked_add(1)?)
}

/// Parse one section's schedule text into `(is_online, meetings)`.
///
/// Empty text or text carrying an online sentinel yields `(true, [])`.
/// A token that does not start with a day glyph is a room label and is
/// attached to every meeting parsed since the previous room label.
pub fn parse_meeting_text(text: &str) -> (bool, Vec<MeetingInterval>) {
    let text = text.trim();
    if text.is_empty() || ONLINE_SENTINELS.iter().any(|s| text.contains(s)) {
        return (true, Vec::new());
    }

    let mut meetings: Vec<MeetingInterval> = Vec::new();
    let mut unlabeled_from = 0;

    for token in text.split(ROOM_SEPARATOR) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let starts_with_day = token.chars().next().and_then(day_index).is_some();
        if starts_with_day {
            parse_day_groups(token, &mut meetings);
        } else {
            for meeting in &mut meetings[unlabeled_from..] {
                meeting.room = token.to_string();
            }
            unlabeled_from = meetings.len();
        }
    }

    (false, meetings)
}

/// Scan `"월1,2,수3,4"`-style groups, appending one interval per run of
/// consecutive periods. Periods of a day listed in several groups of the
/// token are merged together. Characters outside a group are skipped.
fn parse_day_groups(token: &str, meetings: &mut Vec<MeetingInterval>) {
    // (day, periods) in first-seen day order
    let mut days: Vec<(u8, Vec<u32>)> = Vec::new();
    let mut chars = token.chars().peekable();

    while let Some(c) = chars.next() {
        let Some(day) = day_index(c) else {
            continue;
        };

        let mut digits = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_digit() || next == ',' {
                digits.push(next);
                chars.next();
            } else {
                break;
            }
        }

        let periods = digits
            .split(',')
            .filter_map(|p| p.parse::<u32>().ok())
            .filter(|&p| p > 0);
        match days.iter_mut().find(|(d, _)| *d == day) {
            Some((_, existing)) => existing.extend(periods),
            None => days.push((day, periods.collect())),
        }
    }

    for (day, mut periods) in days {
        for (start, end) in merge_runs(&mut periods) {
            meetings.push(MeetingInterval {
                day,
                start_period: start,
                end_period: end,
                room: String::new(),
            });
        }
    }
}

/// Merge sorted period numbers into half-open `[start, last + 1)` runs.
fn merge_runs(periods: &mut Vec<u32>) -> Vec<(u32, u32)> {
    periods.sort_unstable();
    periods.dedup();

    let mut runs: Vec<(u32, u32)> = Vec::new();
    let Some((&first, rest)) = periods.split_first() else {
        return runs;
    };

    let mut start = first;
    let mut prev = first;
    for &p in rest {
        if p != prev + 1 {
            runs.push((start, prev.saturating_add(1)));
            start = p;
        }
        prev = p;
    }
    runs.push((start, prev.saturating_add(1)));
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(day: u8, start: u32, end: u32, room: &str) -> MeetingInterval {
        MeetingInterval {
            day,
            start_period: start,
            end_period: end,
            room: room.to_string(),
        }
    }

    #[test]
    fn test_empty_and_online() {
        assert_eq!(parse_meeting_text(""), (true, vec![]));
        assert_eq!(parse_meeting_text("   "), (true, vec![]));
        assert_eq!(parse_meeting_text("웹강의"), (true, vec![]));
        assert_eq!(parse_meeting_text("온라인(녹화)"), (true, vec![]));
    }

    #[test]
    fn test_single_run() {
        let (online, meetings) = parse_meeting_text("월1,2,3");
        assert!(!online);
        assert_eq!(meetings, vec![interval(0, 1, 4, "")]);
    }

    #[test]
    fn test_multiple_days_with_room() {
        let (online, meetings) = parse_meeting_text("월13,14,15,수16,17:하-232");
        assert!(!online);
        assert_eq!(
            meetings,
            vec![interval(0, 13, 16, "하-232"), interval(2, 16, 18, "하-232")]
        );
    }

    #[test]
    fn test_disjoint_runs_same_day() {
        let (_, meetings) = parse_meeting_text("화5,1,2,6");
        assert_eq!(meetings, vec![interval(1, 1, 3, ""), interval(1, 5, 7, "")]);
    }

    #[test]
    fn test_interleaved_rooms() {
        let (_, meetings) = parse_meeting_text("월1,2:A-101:목3,4:B-202");
        assert_eq!(
            meetings,
            vec![interval(0, 1, 3, "A-101"), interval(3, 3, 5, "B-202")]
        );
    }

    #[test]
    fn test_trailing_meetings_without_room() {
        let (_, meetings) = parse_meeting_text("월1,2:A-101:금7,8");
        assert_eq!(
            meetings,
            vec![interval(0, 1, 3, "A-101"), interval(4, 7, 9, "")]
        );
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        // empty and zero periods are skipped, a glyph without periods is ignored
        let (online, meetings) = parse_meeting_text("월2,,0,x토");
        assert!(!online);
        assert_eq!(meetings, vec![interval(0, 2, 3, "")]);

        let (online, meetings) = parse_meeting_text("TBA");
        assert!(!online);
        assert!(meetings.is_empty());
    }

    #[test]
    fn test_repeated_day_groups_merge() {
        let (_, meetings) = parse_meeting_text("월1,2,월3,4");
        assert_eq!(meetings, vec![interval(0, 1, 5, "")]);

        let (_, meetings) = parse_meeting_text("화7,수1,화8,9,화12");
        assert_eq!(
            meetings,
            vec![
                interval(1, 7, 10, ""),
                interval(1, 12, 13, ""),
                interval(2, 1, 2, "")
            ]
        );
    }

    #[test]
    fn test_duplicate_periods() {
        let (_, meetings) = parse_meeting_text("수3,3,4");
        assert_eq!(meetings, vec![interval(2, 3, 5, "")]);
    }

    #[test]
    fn test_slot_times() {
        assert_eq!(slot_start_time(1), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(slot_end_time(1), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(slot_start_time(4), NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(slot_start_time(0), None);
        assert_eq!(slot_start_time(31), None); // 24:00
    }

    #[test]
    fn test_day_lookup() {
        assert_eq!(day_index('월'), Some(0));
        assert_eq!(day_index('토'), Some(5));
        assert_eq!(day_index('일'), None);
        assert_eq!(day_name(4), Some("Fri"));
        assert_eq!(day_name(6), None);
    }
}
