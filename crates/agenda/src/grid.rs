//! # Weekly Grid Builder
//!
//! This module folds a user's reservations into the weekly teaching grid
//! shown on the agenda page, together with the two dashboard summaries:
//! how many classes fall on today's date and which accepted class comes up
//! next.
//!
//! ## Grid Shape
//!
//! The grid is fixed: seven weekday columns crossed with ten rows, one row
//! per teaching period. Periods start at 08:20 and repeat every 80 minutes
//! (70 teaching minutes plus a break), the last one at 20:10. A class lands
//! in the row whose start is the latest one at or before the class's local
//! start time, so a 08:30 class still renders in the 08:20 row.
//!
//! ## Timezone Handling
//!
//! Reservations are stored as UTC instants, but the grid is a wall-clock
//! artifact: students and tutors agree on "Monday 08:20" in the
//! institution's reference timezone, not on a UTC offset. Every placement
//! decision therefore happens after a full timezone conversion (DST rules
//! included, not a fixed offset) into the reference timezone. A class at
//! 01:30 UTC on Tuesday can belong to Monday's column.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use tutoria_core::models::reservation::{Reservation, ReservationStatus};
use tutoria_core::models::timeblock::Weekday;

/// Wall-clock starts of the ten teaching periods, in row order.
pub const SLOT_STARTS: [SlotLabel; 10] = [
    slot(8, 20),
    slot(9, 40),
    slot(11, 0),
    slot(12, 20),
    slot(13, 30),
    slot(14, 50),
    slot(16, 10),
    slot(17, 30),
    slot(18, 50),
    slot(20, 10),
];

/// Spacing between consecutive grid rows in minutes.
pub const SLOT_PITCH_MINUTES: i64 = 80;

/// Last millisecond of a local day, the closing edge of a display week.
const WEEK_CLOSE: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => panic!("not a valid time of day"),
};

const fn slot(hour: u32, minute: u32) -> SlotLabel {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => SlotLabel(time),
        None => panic!("not a valid time of day"),
    }
}

/// One of the ten fixed row labels. Only values from [`SLOT_STARTS`] exist;
/// arbitrary times cannot be turned into labels except through [`slot_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotLabel(NaiveTime);

impl SlotLabel {
    pub fn time(self) -> NaiveTime {
        self.0
    }

    /// Minutes after local midnight, seconds discarded.
    pub fn minute_of_day(self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// A cell address in the weekly grid: weekday column, period row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSlot {
    pub weekday: Weekday,
    pub label: SlotLabel,
}

/// What the grid renders for one reservation: resolved display texts and
/// how many rows the class stretches across.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry {
    pub reservation_id: Uuid,
    pub title: String,
    pub tutor: String,
    pub student: String,
    pub span: u32,
}

/// The display week in reference-timezone wall-clock terms: Monday 00:00
/// through Sunday 23:59:59.999, both edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekBounds {
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }
}

/// Everything the agenda page needs in one pass over the reservations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyAgenda {
    /// Cell address to stacked entries, in input order within each cell.
    pub grid: HashMap<GridSlot, Vec<GridEntry>>,
    /// Accepted classes whose local date is today, past or future.
    pub today_count: usize,
    /// The accepted class with the earliest start strictly after `now`.
    pub next_up: Option<Reservation>,
}

/// The display week containing `now`, in the reference timezone.
///
/// `now` is localized first, so near-midnight UTC instants resolve to the
/// correct local week before the Monday is derived.
pub fn week_bounds(now: DateTime<Utc>, tz: Tz) -> WeekBounds {
    let today = now.with_timezone(&tz).date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);

    WeekBounds {
        start: monday.and_time(NaiveTime::MIN),
        end: sunday.and_time(WEEK_CLOSE),
    }
}

/// The row a class belongs to: the greatest label at or before the class's
/// local start. Starts earlier than the first period clamp to the first
/// row, starts after the last period fall into the last row. Seconds are
/// ignored.
pub fn slot_for(local_start: NaiveTime) -> SlotLabel {
    let minute_of_day = local_start.num_seconds_from_midnight() / 60;

    let mut assigned = SLOT_STARTS[0];
    for label in SLOT_STARTS {
        if label.minute_of_day() <= minute_of_day {
            assigned = label;
        } else {
            break;
        }
    }
    assigned
}

/// Rows a class occupies: its wall-clock duration over the 80-minute row
/// pitch, rounded to the nearest whole row and never less than one. The
/// standard 70-minute class rounds to a single row.
pub fn slot_span(local_start: NaiveDateTime, local_end: NaiveDateTime) -> u32 {
    let minutes = (local_end - local_start).num_seconds() as f64 / 60.0;
    let rows = (minutes / SLOT_PITCH_MINUTES as f64).round();
    rows.max(1.0) as u32
}

/// Builds the weekly grid for the current display week.
///
/// # Algorithm
///
/// For each reservation:
///
/// 1. Skip anything not accepted; pending and rejected requests never
///    render on the grid.
/// 2. Convert the UTC start and end to reference-timezone wall-clock
///    values.
/// 3. Keep the class only if its local start falls inside the display week
///    containing `now` (Monday 00:00 through Sunday 23:59:59.999,
///    inclusive).
/// 4. Address the cell from the local start: weekday column, plus the row
///    chosen by [`slot_for`].
/// 5. Resolve display texts, applying the catalog fallbacks for courses or
///    accounts that no longer exist.
///
/// Entries landing in the same cell stack in input order, so double
/// bookings that slipped through remain visible rather than overwriting
/// each other.
pub fn build_week_grid(
    reservations: &[Reservation],
    now: DateTime<Utc>,
    tz: Tz,
) -> HashMap<GridSlot, Vec<GridEntry>> {
    let bounds = week_bounds(now, tz);
    let mut grid: HashMap<GridSlot, Vec<GridEntry>> = HashMap::new();

    for reservation in reservations {
        if reservation.status != ReservationStatus::Accepted {
            continue;
        }

        let local_start = reservation.start_time.with_timezone(&tz).naive_local();
        let local_end = reservation.end_time.with_timezone(&tz).naive_local();

        if !bounds.contains(local_start) {
            continue;
        }

        let key = GridSlot {
            weekday: Weekday::from_chrono(local_start.weekday()),
            label: slot_for(local_start.time()),
        };
        let entry = GridEntry {
            reservation_id: reservation.id,
            title: reservation.course_display().to_string(),
            tutor: reservation.tutor_display().to_string(),
            student: reservation.student_display().to_string(),
            span: slot_span(local_start, local_end),
        };
        grid.entry(key).or_default().push(entry);
    }

    grid
}

/// How many accepted classes fall on today's local date. Classes already
/// held earlier today still count; the summary reads "classes today", not
/// "classes left today".
pub fn today_count(reservations: &[Reservation], now: DateTime<Utc>, tz: Tz) -> usize {
    let today = now.with_timezone(&tz).date_naive();

    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Accepted)
        .filter(|r| r.start_time.with_timezone(&tz).date_naive() == today)
        .count()
}

/// The accepted class with the earliest start strictly after `now`,
/// regardless of which display week it falls in. Ties on the start instant
/// break toward the lowest reservation id so the answer is stable.
pub fn next_class(reservations: &[Reservation], now: DateTime<Utc>) -> Option<&Reservation> {
    reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Accepted && r.start_time > now)
        .min_by_key(|r| (r.start_time, r.id))
}

/// Grid plus dashboard summaries in one call, evaluated against the same
/// clock so the three outputs agree with each other.
pub fn build_agenda(reservations: &[Reservation], now: DateTime<Utc>, tz: Tz) -> WeeklyAgenda {
    WeeklyAgenda {
        grid: build_week_grid(reservations, now, tz),
        today_count: today_count(reservations, now, tz),
        next_up: next_class(reservations, now).cloned(),
    }
}

/// [`build_agenda`] against the wall clock.
pub fn build_agenda_now(reservations: &[Reservation], tz: Tz) -> WeeklyAgenda {
    build_agenda(reservations, Utc::now(), tz)
}
