use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::reservation::{Reservation, ReservationStatus};
use crate::schedule::WeeklySchedule;
use crate::space::{Desk, Space};

/// Failures surfaced by the persistence layer. `Conflict` carries the
/// storage-level uniqueness violation on (desk, date, active status) back
/// to the workflow; everything else is an infrastructure fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("an active reservation already exists for this desk and date")]
    Conflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage failure: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Repository trait for space and desk listings
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn list_spaces(&self) -> Result<Vec<Space>, StoreError>;

    async fn upsert_schedule(
        &self,
        space_id: Uuid,
        schedule: &WeeklySchedule,
    ) -> Result<(), StoreError>;
}

/// Repository trait for the per-space weekly schedule lookup consumed by
/// the availability engine. Absence means the space is closed every day.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_space_schedule(
        &self,
        space_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError>;
}

/// Repository trait for desk data access
#[async_trait]
pub trait DeskRepository: Send + Sync {
    async fn find_desk(&self, id: Uuid) -> Result<Option<Desk>, StoreError>;

    async fn list_for_space(&self, space_id: Uuid) -> Result<Vec<Desk>, StoreError>;

    async fn set_availability(&self, id: Uuid, available: bool) -> Result<(), StoreError>;
}

/// Repository trait for the reservation ledger. `has_active_reservation`
/// must be a single indexed query on the date column in production.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn has_active_reservation(
        &self,
        desk_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool, StoreError>;

    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError>;

    async fn find_reservation(&self, id: Uuid) -> Result<Option<Reservation>, StoreError>;

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> Result<(), StoreError>;

    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    async fn list_for_guest(&self, guest_id: Uuid) -> Result<Vec<Reservation>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Reservation>, StoreError>;
}
