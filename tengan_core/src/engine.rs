//! Schedule derivation engine.
//!
//! Everything here is a pure function of `(persisted state, now)`. The
//! clock is always caller-supplied so the CLI passes `Local::now()` while
//! tests inject fixed instants; nothing is cached between calls.
//!
//! Protocol summary:
//! - Day 0 (surgery day): all three drops together, hourly, starting at
//!   the recorded day-0 start time.
//! - Day 1+: a single drop every hour, rotating DEX → Moxi → Diclo, with
//!   the rotation forced back to DEX on the first dose of each calendar
//!   day.

use crate::catalog::ROTATION_ORDER;
use crate::types::{DerivedSchedule, ScheduleState, ScheduleStatus, SurgeryInfo};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

/// Dosing interval shared by day 0 and day 1+
fn drop_interval() -> Duration {
    Duration::hours(1)
}

/// Derive the lifecycle status and days since surgery.
///
/// `days_post_op` is a whole-calendar-day difference in the local
/// timezone, ignoring time of day. Absent surgery date yields
/// `(Onboarding, -1)`; a future-dated surgery also collapses to
/// `Onboarding` (with the negative day count preserved).
pub fn derive_status(info: &SurgeryInfo, now: DateTime<Local>) -> (ScheduleStatus, i64) {
    let Some(surgery_date) = info.date else {
        return (ScheduleStatus::Onboarding, -1);
    };

    let days_post_op = (now.date_naive() - surgery_date).num_days();
    let status = match days_post_op {
        0 => ScheduleStatus::Day0,
        d if d > 0 => ScheduleStatus::Day1Plus,
        _ => ScheduleStatus::Onboarding,
    };
    (status, days_post_op)
}

/// Derive the full schedule projection: status, due medicines, next-drop
/// time.
pub fn derive_schedule(state: &ScheduleState, now: DateTime<Local>) -> DerivedSchedule {
    let (status, days_post_op) = derive_status(&state.surgery_info, now);

    let mut current_medicines = Vec::new();
    let mut next_drop_time = None;

    match status {
        ScheduleStatus::Day0 => {
            // Day 0 needs an explicit start time; without one there is
            // nothing to count down to yet.
            if let (Some(date), Some(start)) =
                (state.surgery_info.date, state.surgery_info.day0_start_time)
            {
                current_medicines = ROTATION_ORDER.to_vec();
                next_drop_time = match state.last_drop_time {
                    None => local_instant(date, start),
                    Some(last) => Some(last + drop_interval()),
                };
            }
        }
        ScheduleStatus::Day1Plus => {
            let new_day = is_new_day(state.last_drop_time, now);
            let index = if new_day { 0 } else { state.rotation_index };
            current_medicines = vec![*ROTATION_ORDER
                .get(index as usize)
                .unwrap_or(&ROTATION_ORDER[0])];
            next_drop_time = if new_day {
                // First dose of the day is immediately due
                Some(now)
            } else {
                state.last_drop_time.map(|last| last + drop_interval())
            };
        }
        ScheduleStatus::Onboarding => {}
    }

    DerivedSchedule {
        status,
        days_post_op,
        current_medicines,
        next_drop_time,
    }
}

/// Record a completed dose.
///
/// Returns the new state for the store to persist; the caller owns the
/// write. On day 1+ the rotation advances `(index + 1) % 3`, except on
/// the first dose of a new day where the stored index is stale: that dose
/// was DEX (index 0), so the next is forced to Moxi (index 1). Day 0 does
/// not use the rotation and leaves the index untouched.
pub fn mark_complete(state: &ScheduleState, now: DateTime<Local>) -> ScheduleState {
    let (status, _) = derive_status(&state.surgery_info, now);

    let mut next = state.clone();
    if status == ScheduleStatus::Day1Plus {
        // New-day detection runs against the pre-mutation state
        next.rotation_index = if is_new_day(state.last_drop_time, now) {
            1
        } else {
            (state.rotation_index + 1) % 3
        };
    }
    next.last_drop_time = Some(now);
    next
}

/// Replace the surgery info, starting a fresh protocol timeline.
///
/// The only operation that resets dosing history: `last_drop_time` is
/// cleared and the rotation restarts at DEX.
pub fn set_surgery_info(date: NaiveDate, time: NaiveTime) -> ScheduleState {
    ScheduleState {
        surgery_info: SurgeryInfo {
            date: Some(date),
            day0_start_time: Some(time),
        },
        last_drop_time: None,
        rotation_index: 0,
    }
}

/// Force the rotation display back to DEX without touching the last-drop
/// timestamp. New-day detection stays a strict calendar-date comparison,
/// so a manual reset never re-triggers the new-day index override.
pub fn reset_today(state: &ScheduleState) -> ScheduleState {
    ScheduleState {
        rotation_index: 0,
        ..state.clone()
    }
}

/// Clear everything back to onboarding defaults
pub fn reset_all_data() -> ScheduleState {
    ScheduleState::default()
}

/// A "new day" means no dose was ever completed, or the last dose fell on
/// a different local calendar date than `now`.
fn is_new_day(last_drop: Option<DateTime<Local>>, now: DateTime<Local>) -> bool {
    match last_drop {
        None => true,
        Some(last) => last.date_naive() != now.date_naive(),
    }
}

/// Resolve a local date + time to an instant. Returns `None` for wall
/// times skipped by a DST transition.
fn local_instant(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&date.and_time(time)).earliest()
}
