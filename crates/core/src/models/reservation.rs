use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown when the booked course has been removed from the catalog.
pub const COURSE_FALLBACK: &str = "Clase";
/// Shown when the tutor account no longer exists.
pub const TUTOR_FALLBACK: &str = "N/A";
/// Shown when the student account no longer exists.
pub const STUDENT_FALLBACK: &str = "[Eliminado]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ReservationStatus {
    /// A reservation settles exactly once: only `pending` may move, and
    /// only into a terminal state.
    pub fn can_become(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Accepted)
                | (ReservationStatus::Pending, ReservationStatus::Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ReservationStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub private_lesson_id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub status: ReservationStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub course_name: Option<String>,
    pub tutor_name: Option<String>,
    pub student_name: Option<String>,
}

impl Reservation {
    pub fn course_display(&self) -> &str {
        self.course_name.as_deref().unwrap_or(COURSE_FALLBACK)
    }

    pub fn tutor_display(&self) -> &str {
        self.tutor_name.as_deref().unwrap_or(TUTOR_FALLBACK)
    }

    pub fn student_display(&self) -> &str {
        self.student_name.as_deref().unwrap_or(STUDENT_FALLBACK)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub private_lesson_id: Uuid,
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    pub private_lesson_id: Uuid,
    pub student_id: Uuid,
    pub status: ReservationStatus,
}

impl UpdateReservationRequest {
    /// Builds the status-change payload for an existing reservation; the
    /// lesson and student ids ride along so the receiving side can verify
    /// the update targets the record it thinks it does.
    pub fn for_status(reservation: &Reservation, status: ReservationStatus) -> Self {
        Self {
            private_lesson_id: reservation.private_lesson_id,
            student_id: reservation.student_id,
            status,
        }
    }
}
