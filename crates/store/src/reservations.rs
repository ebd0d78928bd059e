use async_trait::async_trait;
use eyre::Result;
use uuid::Uuid;

use tutoria_core::models::reservation::{
    CreateReservationRequest, Reservation, UpdateReservationRequest,
};

/// Where reservations live. The scheduling layer only ever talks to this
/// trait, so tests can swap in mocks and the UI can swap in whatever
/// transport backs it.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn reservations_for_tutor(&self, tutor_id: Uuid) -> Result<Vec<Reservation>>;

    async fn reservations_for_student(&self, student_id: Uuid) -> Result<Vec<Reservation>>;

    /// Creates a new pending reservation and returns it with its assigned id.
    async fn create_reservation(&self, request: CreateReservationRequest) -> Result<Reservation>;

    /// Settles a pending reservation as accepted or rejected.
    async fn update_status(
        &self,
        id: Uuid,
        update: UpdateReservationRequest,
    ) -> Result<Reservation>;

    async fn delete_reservation(&self, id: Uuid) -> Result<()>;
}
