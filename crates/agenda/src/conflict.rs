//! # Booking Conflict Resolution
//!
//! When a tutor accepts a request, every other pending request for the
//! exact same start instant has lost the slot and must be rejected. This
//! module finds those losers and runs the rejections against the store.
//!
//! Bookings are quantized to the fixed period grid, so two classes collide
//! exactly when their start instants are equal; comparing starts is the
//! whole overlap test. Widening this to interval overlap would change
//! behavior only if free-form start times were ever introduced.

use tutoria_core::models::reservation::{Reservation, ReservationStatus, UpdateReservationRequest};
use tutoria_store::ReservationStore;
use uuid::Uuid;

/// What the rejection cascade actually did. `rejected` and `failed`
/// preserve the order in which the candidates were attempted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeOutcome {
    pub rejected: Vec<Uuid>,
    pub failed: Vec<Uuid>,
}

impl CascadeOutcome {
    /// True when every conflicting request was rejected successfully.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The pending requests that lose the slot to `accepted`: identical start
/// instant, different reservation. The working set is expected to be the
/// tutor's own reservation list, so no tutor filter is applied here.
pub fn conflicting_requests<'a>(
    accepted: &Reservation,
    working_set: &'a [Reservation],
) -> Vec<&'a Reservation> {
    working_set
        .iter()
        .filter(|r| {
            r.status == ReservationStatus::Pending
                && r.id != accepted.id
                && r.start_time == accepted.start_time
        })
        .collect()
}

/// Rejects every request that conflicts with the just-accepted one, one
/// status update at a time in working-set order.
///
/// A failed update is logged and recorded in the outcome, and the cascade
/// moves on to the remaining candidates; one flaky rejection must not leave
/// the rest of the collisions pending. The caller decides whether a dirty
/// outcome warrants surfacing to the user or retrying.
pub async fn reject_conflicts(
    store: &impl ReservationStore,
    accepted: &Reservation,
    working_set: &[Reservation],
) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();

    for request in conflicting_requests(accepted, working_set) {
        let update = UpdateReservationRequest::for_status(request, ReservationStatus::Rejected);
        match store.update_status(request.id, update).await {
            Ok(_) => {
                tracing::debug!("Rejected conflicting reservation: id={}", request.id);
                outcome.rejected.push(request.id);
            }
            Err(err) => {
                tracing::error!(
                    "Failed to reject conflicting reservation: id={}, error={}",
                    request.id,
                    err
                );
                outcome.failed.push(request.id);
            }
        }
    }

    outcome
}
