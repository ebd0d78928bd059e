//! # Request Lifecycle
//!
//! Tutor-side handling of incoming class requests: accepting one (which
//! triggers the conflict cascade), rejecting one, and splitting a
//! reservation list into the status buckets the request screens render.

use tutoria_core::errors::{AgendaError, AgendaResult};
use tutoria_core::models::reservation::{Reservation, ReservationStatus, UpdateReservationRequest};
use tutoria_store::ReservationStore;

use crate::conflict::{self, CascadeOutcome};

/// A reservation list split by status, each bucket in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusPartition {
    pub pending: Vec<Reservation>,
    pub accepted: Vec<Reservation>,
    pub rejected: Vec<Reservation>,
}

/// Accepts a pending request, then rejects everything that collides with
/// it.
///
/// The accept itself failing is an error and nothing is cascaded; a slot
/// may only evict its rivals once it is actually taken. Failures inside the
/// cascade do not fail the accept. They are reported through the returned
/// [`CascadeOutcome`] instead, because the acceptance already happened and
/// rolling it back over a rival's flaky rejection would be worse.
///
/// `working_set` is the tutor's current reservation list as the caller
/// holds it; conflicts are searched there, not refetched.
pub async fn accept_request(
    store: &impl ReservationStore,
    request: &Reservation,
    working_set: &[Reservation],
) -> AgendaResult<CascadeOutcome> {
    let update = UpdateReservationRequest::for_status(request, ReservationStatus::Accepted);
    let accepted = store
        .update_status(request.id, update)
        .await
        .map_err(AgendaError::Store)?;

    tracing::debug!("Accepted reservation: id={}", accepted.id);
    Ok(conflict::reject_conflicts(store, &accepted, working_set).await)
}

/// Rejects a single pending request. No cascade; declining one student
/// says nothing about the others competing for the slot.
pub async fn reject_request(
    store: &impl ReservationStore,
    request: &Reservation,
) -> AgendaResult<Reservation> {
    let update = UpdateReservationRequest::for_status(request, ReservationStatus::Rejected);
    let rejected = store
        .update_status(request.id, update)
        .await
        .map_err(AgendaError::Store)?;

    tracing::debug!("Rejected reservation: id={}", rejected.id);
    Ok(rejected)
}

/// Splits reservations into pending, accepted and rejected buckets,
/// preserving input order within each.
pub fn partition(reservations: &[Reservation]) -> StatusPartition {
    let mut split = StatusPartition::default();

    for reservation in reservations {
        match reservation.status {
            ReservationStatus::Pending => split.pending.push(reservation.clone()),
            ReservationStatus::Accepted => split.accepted.push(reservation.clone()),
            ReservationStatus::Rejected => split.rejected.push(reservation.clone()),
        }
    }

    split
}
