//! # Booking Flow
//!
//! Student-side booking: turning a tutor's recurring weekly block into a
//! concrete class request on a specific date, and cancelling a request
//! that has not been answered yet. The tutor-side half lives here too:
//! expanding a grid selection into publishable weekly blocks.
//!
//! Materialization is the one place wall-clock times become UTC instants,
//! and it runs through the reference timezone's real rules. The same
//! "Monday 08:20" block lands on a different UTC hour in January than in
//! August because of DST.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use tutoria_core::errors::{AgendaError, AgendaResult};
use tutoria_core::models::reservation::{CreateReservationRequest, Reservation, ReservationStatus};
use tutoria_core::models::timeblock::{CreateTimeBlockRequest, Weekday, WeeklyTimeBlock};
use tutoria_store::{ReservationStore, TimeBlockStore};

use crate::grid::SlotLabel;

/// Teaching minutes inside one 80-minute grid period; the remainder is the
/// break before the next period.
pub const BLOCK_TEACHING_MINUTES: i64 = 70;

/// Pins a recurring block to a calendar date, producing the UTC start and
/// end instants of the concrete class.
///
/// The date must actually be one the block covers: matching weekday,
/// inside the validity window. The block's wall-clock hours are then
/// resolved in the reference timezone. Ambiguous local times (the repeated
/// hour when DST ends) take the earlier instant; nonexistent local times
/// (the skipped hour when DST starts) are a validation error, since no
/// class can start at a time that never occurs.
pub fn materialize(
    block: &WeeklyTimeBlock,
    date: NaiveDate,
    tz: Tz,
) -> AgendaResult<(DateTime<Utc>, DateTime<Utc>)> {
    if !block.covers(date) {
        return Err(AgendaError::Validation(format!(
            "Time block {} is not offered on {}",
            block.id, date
        )));
    }

    let start = resolve_local(date.and_time(block.start_hour), tz)?;
    let end = resolve_local(date.and_time(block.end_hour), tz)?;
    Ok((start, end))
}

fn resolve_local(local: NaiveDateTime, tz: Tz) -> AgendaResult<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(moment) => Ok(moment.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(AgendaError::Validation(format!(
            "Local time {} does not exist in {}",
            local, tz
        ))),
    }
}

/// Files a class request against a tutor's block on the given date. The
/// created reservation starts out pending and stays invisible on grids
/// until the tutor accepts it.
pub async fn request_class(
    store: &impl ReservationStore,
    block: &WeeklyTimeBlock,
    date: NaiveDate,
    tz: Tz,
    private_lesson_id: Uuid,
    student_id: Uuid,
) -> AgendaResult<Reservation> {
    let (start_time, end_time) = materialize(block, date, tz)?;

    let request = CreateReservationRequest {
        private_lesson_id,
        tutor_id: block.tutor_id,
        student_id,
        start_time,
        end_time,
    };
    let reservation = store
        .create_reservation(request)
        .await
        .map_err(AgendaError::Store)?;

    tracing::debug!(
        "Class requested: id={}, tutor_id={}, start_time={}",
        reservation.id,
        reservation.tutor_id,
        reservation.start_time
    );
    Ok(reservation)
}

/// Withdraws a request the tutor has not answered yet. Settled
/// reservations cannot be cancelled from the student side.
pub async fn cancel_request(
    store: &impl ReservationStore,
    request: &Reservation,
) -> AgendaResult<()> {
    if request.status != ReservationStatus::Pending {
        return Err(AgendaError::Validation(format!(
            "Reservation {} is already settled and can no longer be cancelled",
            request.id
        )));
    }

    store
        .delete_reservation(request.id)
        .await
        .map_err(AgendaError::Store)
}

/// Expands a grid selection into weekly block requests. Each selected cell
/// becomes one block starting at the cell's row label and running for the
/// 70 teaching minutes, with the shared validity window attached.
pub fn blocks_from_selection(
    selection: &[(Weekday, SlotLabel)],
    valid_from: NaiveDateTime,
    valid_until: NaiveDateTime,
) -> Vec<CreateTimeBlockRequest> {
    selection
        .iter()
        .map(|&(weekday, label)| {
            let start_hour = label.time();
            CreateTimeBlockRequest {
                weekday,
                start_hour,
                end_hour: start_hour + Duration::minutes(BLOCK_TEACHING_MINUTES),
                valid_from,
                valid_until,
            }
        })
        .collect()
}

/// Publishes a batch of weekly blocks one at a time, in selection order.
/// The first failure aborts the batch and surfaces the error; blocks
/// already created stay created.
pub async fn publish_blocks(
    store: &impl TimeBlockStore,
    tutor_id: Uuid,
    requests: Vec<CreateTimeBlockRequest>,
) -> AgendaResult<Vec<WeeklyTimeBlock>> {
    let mut created = Vec::with_capacity(requests.len());

    for request in requests {
        let block = store
            .create_timeblock(tutor_id, request)
            .await
            .map_err(AgendaError::Store)?;
        created.push(block);
    }

    tracing::debug!(
        "Published weekly blocks: tutor_id={}, count={}",
        tutor_id,
        created.len()
    );
    Ok(created)
}
