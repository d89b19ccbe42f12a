//! Tier-ordered backtracking search for credit-exact, conflict-free schedules.
//!
//! The search walks tiers in ascending order and, within a tier, courses in
//! course id order. Each course is first skipped, then tried with each of its
//! alternative sections that fits the branch. A complete branch is accepted
//! only when its credits hit the target exactly (and the constrained tier's
//! sub-total, if any, hits its own target). Accepted schedules are ranked
//! before they are returned.

mod core;
mod state;
mod stats;

pub use self::core::{search, ScheduleSearch, SearchError};
pub use stats::{SearchOutcome, SearchStats};
