use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use tutoria_core::models::reservation::{
    CreateReservationRequest, Reservation, UpdateReservationRequest,
};
use tutoria_core::models::timeblock::{CreateTimeBlockRequest, WeeklyTimeBlock};

use crate::reservations::ReservationStore;
use crate::timeblocks::TimeBlockStore;

// Mock stores for testing
mock! {
    pub ReservationApi {}

    #[async_trait]
    impl ReservationStore for ReservationApi {
        async fn reservations_for_tutor(&self, tutor_id: Uuid) -> eyre::Result<Vec<Reservation>>;

        async fn reservations_for_student(&self, student_id: Uuid) -> eyre::Result<Vec<Reservation>>;

        async fn create_reservation(
            &self,
            request: CreateReservationRequest,
        ) -> eyre::Result<Reservation>;

        async fn update_status(
            &self,
            id: Uuid,
            update: UpdateReservationRequest,
        ) -> eyre::Result<Reservation>;

        async fn delete_reservation(&self, id: Uuid) -> eyre::Result<()>;
    }
}

mock! {
    pub TimeBlockApi {}

    #[async_trait]
    impl TimeBlockStore for TimeBlockApi {
        async fn timeblocks_for_tutor(
            &self,
            tutor_id: Uuid,
            on_date: Option<NaiveDate>,
        ) -> eyre::Result<Vec<WeeklyTimeBlock>>;

        async fn create_timeblock(
            &self,
            tutor_id: Uuid,
            request: CreateTimeBlockRequest,
        ) -> eyre::Result<WeeklyTimeBlock>;

        async fn delete_timeblock(&self, id: Uuid) -> eyre::Result<()>;
    }
}
