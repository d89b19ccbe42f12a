//! Weekly timetable primitives: schedule-text parsing, conflict detection
//! and calendar layout.

mod calendar;
mod conflict;
mod parser;

pub use calendar::{calendar_blocks, CalendarBlock};
pub use conflict::{can_place, conflict_details, conflicts, ConflictDetail};
pub use parser::{
    day_index, day_name, parse_meeting_text, slot_end_time, slot_start_time, ONLINE_SENTINELS,
    SLOT_MINUTES, SLOT_START_HOUR,
};
