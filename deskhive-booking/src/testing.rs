//! HashMap-backed fakes for the repository contracts, used by the engine
//! and workflow unit tests. `InMemoryReservations` mirrors the production
//! uniqueness rule inside `create`, so the commit-time conflict path can be
//! exercised without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use deskhive_domain::repository::{
    DeskRepository, ReservationRepository, ScheduleRepository, StoreError,
};
use deskhive_domain::reservation::{Reservation, ReservationStatus};
use deskhive_domain::schedule::WeeklySchedule;
use deskhive_domain::space::Desk;

pub fn desk_in(space_id: Uuid) -> Desk {
    Desk::new(space_id, "Window desk".to_string(), 2500, 1)
}

#[derive(Default)]
pub struct InMemorySchedules {
    rows: Mutex<HashMap<Uuid, WeeklySchedule>>,
}

impl InMemorySchedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(space_id: Uuid, schedule: WeeklySchedule) -> Self {
        let fake = Self::new();
        fake.rows.lock().unwrap().insert(space_id, schedule);
        fake
    }
}

#[async_trait]
impl ScheduleRepository for InMemorySchedules {
    async fn find_space_schedule(
        &self,
        space_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&space_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryDesks {
    rows: Mutex<HashMap<Uuid, Desk>>,
}

impl InMemoryDesks {
    pub fn with(desk: Desk) -> Self {
        let fake = Self::default();
        fake.rows.lock().unwrap().insert(desk.id, desk);
        fake
    }
}

#[async_trait]
impl DeskRepository for InMemoryDesks {
    async fn find_desk(&self, id: Uuid) -> Result<Option<Desk>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_space(&self, space_id: Uuid) -> Result<Vec<Desk>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.space_id == space_id)
            .cloned()
            .collect())
    }

    async fn set_availability(&self, id: Uuid, available: bool) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let desk = rows.get_mut(&id).ok_or(StoreError::NotFound("desk"))?;
        desk.set_availability(available);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryReservations {
    rows: Mutex<HashMap<Uuid, Reservation>>,
    // When set, the pre-check lies and reports the slot free, simulating a
    // concurrent submission that lands between check and create.
    blind_precheck: AtomicBool,
}

impl InMemoryReservations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, reservation: Reservation) {
        self.rows
            .lock()
            .unwrap()
            .insert(reservation.id, reservation);
    }

    pub fn get(&self, id: Uuid) -> Option<Reservation> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn simulate_race_window(&self) {
        self.blind_precheck.store(true, Ordering::SeqCst);
    }

    fn slot_taken(&self, desk_id: Uuid, date: NaiveDate) -> bool {
        self.rows
            .lock()
            .unwrap()
            .values()
            .any(|r| r.desk_id == desk_id && r.reservation_date == date && r.is_active())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservations {
    async fn has_active_reservation(
        &self,
        desk_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool, StoreError> {
        if self.blind_precheck.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.slot_taken(desk_id, date))
    }

    async fn create(&self, reservation: &Reservation) -> Result<Reservation, StoreError> {
        // Same rule the partial unique index enforces in Postgres
        if self.slot_taken(reservation.desk_id, reservation.reservation_date) {
            return Err(StoreError::Conflict);
        }
        self.insert(reservation.clone());
        Ok(reservation.clone())
    }

    async fn find_reservation(&self, id: Uuid) -> Result<Option<Reservation>, StoreError> {
        Ok(self.get(id))
    }

    async fn update_status(&self, id: Uuid, status: ReservationStatus) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound("reservation"))?;
        row.update_status(status);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("reservation"))
    }

    async fn list_for_guest(&self, guest_id: Uuid) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.guest_id == Some(guest_id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}
