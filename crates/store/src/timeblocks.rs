use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use tutoria_core::models::timeblock::{CreateTimeBlockRequest, WeeklyTimeBlock};

/// Source of the recurring weekly availability blocks tutors publish.
#[async_trait]
pub trait TimeBlockStore: Send + Sync {
    /// Lists a tutor's blocks. With `on_date` set, only blocks offered on
    /// that calendar date are returned (weekday match, validity window).
    async fn timeblocks_for_tutor(
        &self,
        tutor_id: Uuid,
        on_date: Option<NaiveDate>,
    ) -> Result<Vec<WeeklyTimeBlock>>;

    async fn create_timeblock(
        &self,
        tutor_id: Uuid,
        request: CreateTimeBlockRequest,
    ) -> Result<WeeklyTimeBlock>;

    async fn delete_timeblock(&self, id: Uuid) -> Result<()>;
}
