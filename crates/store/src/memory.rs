use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, bail, eyre};
use tokio::sync::RwLock;
use uuid::Uuid;

use tutoria_core::models::reservation::{
    CreateReservationRequest, Reservation, ReservationStatus, UpdateReservationRequest,
};
use tutoria_core::models::timeblock::{CreateTimeBlockRequest, WeeklyTimeBlock};

use crate::reservations::ReservationStore;
use crate::timeblocks::TimeBlockStore;

/// In-process store backed by plain vectors. Stands in for the real
/// transport in tests and demos while enforcing the same rules the
/// backend does: reservations settle once, deletes only while pending,
/// time ranges must be forward.
#[derive(Default)]
pub struct MemoryStore {
    reservations: RwLock<Vec<Reservation>>,
    timeblocks: RwLock<Vec<WeeklyTimeBlock>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an already-materialized reservation, id and all. Meant for
    /// seeding fixtures; normal creation goes through the store trait.
    pub async fn insert_reservation(&self, reservation: Reservation) {
        self.reservations.write().await.push(reservation);
    }

    pub async fn insert_timeblock(&self, block: WeeklyTimeBlock) {
        self.timeblocks.write().await.push(block);
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn reservations_for_tutor(&self, tutor_id: Uuid) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut found: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.tutor_id == tutor_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.start_time);

        tracing::debug!(
            "Reservations listed for tutor: tutor_id={}, count={}",
            tutor_id,
            found.len()
        );
        Ok(found)
    }

    async fn reservations_for_student(&self, student_id: Uuid) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut found: Vec<Reservation> = reservations
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.start_time);

        tracing::debug!(
            "Reservations listed for student: student_id={}, count={}",
            student_id,
            found.len()
        );
        Ok(found)
    }

    async fn create_reservation(&self, request: CreateReservationRequest) -> Result<Reservation> {
        if request.end_time <= request.start_time {
            bail!("Reservation end must be after its start");
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            private_lesson_id: request.private_lesson_id,
            tutor_id: request.tutor_id,
            student_id: request.student_id,
            status: ReservationStatus::Pending,
            start_time: request.start_time,
            end_time: request.end_time,
            course_name: None,
            tutor_name: None,
            student_name: None,
        };

        tracing::debug!(
            "Creating reservation: id={}, tutor_id={}, start_time={}",
            reservation.id,
            reservation.tutor_id,
            reservation.start_time
        );
        self.reservations.write().await.push(reservation.clone());
        Ok(reservation)
    }

    async fn update_status(
        &self,
        id: Uuid,
        update: UpdateReservationRequest,
    ) -> Result<Reservation> {
        let mut reservations = self.reservations.write().await;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| eyre!("Reservation not found"))?;

        if reservation.private_lesson_id != update.private_lesson_id
            || reservation.student_id != update.student_id
        {
            bail!("Update payload does not match reservation {id}");
        }
        if !reservation.status.can_become(update.status) {
            bail!(
                "Reservation {} cannot move from {:?} to {:?}",
                id,
                reservation.status,
                update.status
            );
        }

        reservation.status = update.status;
        tracing::debug!("Reservation status updated: id={}, status={:?}", id, update.status);
        Ok(reservation.clone())
    }

    async fn delete_reservation(&self, id: Uuid) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        let reservation = reservations
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| eyre!("Reservation not found"))?;

        if reservation.status != ReservationStatus::Pending {
            bail!("Reservation {} is already settled and cannot be deleted", id);
        }

        reservations.retain(|r| r.id != id);
        tracing::debug!("Reservation deleted: id={}", id);
        Ok(())
    }
}

#[async_trait]
impl TimeBlockStore for MemoryStore {
    async fn timeblocks_for_tutor(
        &self,
        tutor_id: Uuid,
        on_date: Option<NaiveDate>,
    ) -> Result<Vec<WeeklyTimeBlock>> {
        let blocks = self.timeblocks.read().await;
        let mut found: Vec<WeeklyTimeBlock> = blocks
            .iter()
            .filter(|b| b.tutor_id == tutor_id)
            .filter(|b| on_date.is_none_or(|date| b.covers(date)))
            .cloned()
            .collect();
        found.sort_by_key(|b| (b.weekday, b.start_hour));

        tracing::debug!(
            "Time blocks listed for tutor: tutor_id={}, on_date={:?}, count={}",
            tutor_id,
            on_date,
            found.len()
        );
        Ok(found)
    }

    async fn create_timeblock(
        &self,
        tutor_id: Uuid,
        request: CreateTimeBlockRequest,
    ) -> Result<WeeklyTimeBlock> {
        if request.end_hour <= request.start_hour {
            bail!("Time block end must be after its start");
        }
        if request.valid_until < request.valid_from {
            bail!("Time block validity window is inverted");
        }

        let block = WeeklyTimeBlock {
            id: Uuid::new_v4(),
            tutor_id,
            weekday: request.weekday,
            start_hour: request.start_hour,
            end_hour: request.end_hour,
            valid_from: request.valid_from,
            valid_until: request.valid_until,
        };

        tracing::debug!(
            "Creating time block: id={}, tutor_id={}, weekday={}, start_hour={}",
            block.id,
            block.tutor_id,
            block.weekday,
            block.start_hour
        );
        self.timeblocks.write().await.push(block.clone());
        Ok(block)
    }

    async fn delete_timeblock(&self, id: Uuid) -> Result<()> {
        let mut blocks = self.timeblocks.write().await;
        if !blocks.iter().any(|b| b.id == id) {
            return Err(eyre!("Time block not found"));
        }

        blocks.retain(|b| b.id != id);
        tracing::debug!("Time block deleted: id={}", id);
        Ok(())
    }
}
