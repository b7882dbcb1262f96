use std::sync::Arc;

use uuid::Uuid;

use deskhive_domain::actor::Actor;
use deskhive_domain::calendar;
use deskhive_domain::repository::{DeskRepository, ReservationRepository, StoreError};
use deskhive_domain::reservation::{Reservation, ReservationStatus};

use crate::availability::{AvailabilityEngine, Decision, DenyReason};
use crate::clock::Clock;

/// Booking failures surfaced to the caller as typed results. Only the
/// `Storage` variant is an infrastructure fault; everything else is a
/// recoverable validation outcome.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("reservation date could not be parsed")]
    InvalidDate,

    #[error("reservation date is in the past")]
    DateInPast,

    #[error("desk has been disabled by the host")]
    DeskDisabled,

    #[error("space has no weekly schedule and is not available")]
    NoSchedule,

    #[error("space is closed on that day of the week")]
    DayClosed,

    #[error("desk is already booked for that date")]
    AlreadyBooked,

    #[error("a conflicting reservation was committed first")]
    PersistenceConflict,

    #[error("actor is not allowed to perform this action")]
    AuthDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("reservation cannot move from {0:?} to the requested status")]
    InvalidTransition(ReservationStatus),

    #[error("storage failure")]
    Storage(#[source] StoreError),
}

impl From<DenyReason> for BookingError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::DeskDisabled => BookingError::DeskDisabled,
            DenyReason::NoSchedule => BookingError::NoSchedule,
            DenyReason::DayClosed => BookingError::DayClosed,
            DenyReason::AlreadyBooked => BookingError::AlreadyBooked,
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            // The storage-level unique index lost us the race; user-facing
            // messaging treats this the same as ALREADY_BOOKED.
            StoreError::Conflict => BookingError::PersistenceConflict,
            StoreError::NotFound(what) => BookingError::NotFound(what),
            other => BookingError::Storage(other),
        }
    }
}

/// Orchestrates a reservation's lifecycle: Pending on submit, explicit
/// transitions to Confirmed/Cancelled, and destructive deletion. All
/// authorization is decided from the explicit `Actor` argument.
pub struct ReservationWorkflow {
    engine: AvailabilityEngine,
    desks: Arc<dyn DeskRepository>,
    reservations: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl ReservationWorkflow {
    pub fn new(
        engine: AvailabilityEngine,
        desks: Arc<dyn DeskRepository>,
        reservations: Arc<dyn ReservationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            desks,
            reservations,
            clock,
        }
    }

    /// Validate and create a reservation for `guest` on the given desk.
    ///
    /// The raw date is normalized first (time-of-day discarded), then the
    /// past-date gate runs before the engine is consulted at all.
    pub async fn submit(
        &self,
        desk_id: Uuid,
        guest: &Actor,
        raw_date: &str,
    ) -> Result<Reservation, BookingError> {
        let date =
            calendar::parse_reservation_date(raw_date).map_err(|_| BookingError::InvalidDate)?;

        if date < self.clock.today() {
            return Err(BookingError::DateInPast);
        }

        let desk = self
            .desks
            .find_desk(desk_id)
            .await?
            .ok_or(BookingError::NotFound("desk"))?;

        match self.engine.can_book(&desk, date).await? {
            Decision::Allowed => {}
            Decision::Denied(reason) => return Err(reason.into()),
        }

        let reservation = Reservation::new(desk.id, guest.id, date);
        Ok(self.reservations.create(&reservation).await?)
    }

    /// Pending → Confirmed. Admin action; confirming an already confirmed
    /// reservation is a no-op, confirming a cancelled one is invalid.
    pub async fn confirm(
        &self,
        reservation_id: Uuid,
        actor: &Actor,
    ) -> Result<Reservation, BookingError> {
        if !actor.is_admin {
            return Err(BookingError::AuthDenied);
        }

        let mut reservation = self.fetch(reservation_id).await?;
        match reservation.status {
            ReservationStatus::Confirmed => Ok(reservation),
            ReservationStatus::Cancelled => {
                Err(BookingError::InvalidTransition(ReservationStatus::Cancelled))
            }
            ReservationStatus::Pending => {
                self.reservations
                    .update_status(reservation_id, ReservationStatus::Confirmed)
                    .await?;
                reservation.update_status(ReservationStatus::Confirmed);
                Ok(reservation)
            }
        }
    }

    /// Any active status → Cancelled. Only the reserving guest may cancel;
    /// cancelling an already cancelled reservation is a successful no-op.
    pub async fn cancel(
        &self,
        reservation_id: Uuid,
        actor: &Actor,
    ) -> Result<Reservation, BookingError> {
        let mut reservation = self.fetch(reservation_id).await?;

        if reservation.guest_id != Some(actor.id) {
            return Err(BookingError::AuthDenied);
        }

        if reservation.status == ReservationStatus::Cancelled {
            return Ok(reservation);
        }

        self.reservations
            .update_status(reservation_id, ReservationStatus::Cancelled)
            .await?;
        reservation.update_status(ReservationStatus::Cancelled);
        Ok(reservation)
    }

    /// Erase the record entirely. Permitted for the reserving guest or an
    /// admin, from any status; distinct from cancellation.
    pub async fn delete(&self, reservation_id: Uuid, actor: &Actor) -> Result<(), BookingError> {
        let reservation = self.fetch(reservation_id).await?;

        if reservation.guest_id != Some(actor.id) && !actor.is_admin {
            return Err(BookingError::AuthDenied);
        }

        self.reservations.remove(reservation_id).await?;
        Ok(())
    }

    async fn fetch(&self, reservation_id: Uuid) -> Result<Reservation, BookingError> {
        self.reservations
            .find_reservation(reservation_id)
            .await?
            .ok_or(BookingError::NotFound("reservation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::testing::{desk_in, InMemoryDesks, InMemoryReservations, InMemorySchedules};
    use chrono::NaiveDate;
    use deskhive_domain::schedule::WeeklySchedule;
    use deskhive_domain::space::Desk;

    // Fixed "today": Friday 2026-08-07. 2026-09-01 is a Tuesday and
    // 2026-09-05 a Saturday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    struct Fixture {
        workflow: ReservationWorkflow,
        reservations: Arc<InMemoryReservations>,
        desks: Arc<InMemoryDesks>,
        desk: Desk,
    }

    fn fixture_with_schedule(schedule: Option<WeeklySchedule>) -> Fixture {
        let space_id = Uuid::new_v4();
        let schedules = Arc::new(match schedule {
            Some(schedule) => InMemorySchedules::with(space_id, schedule),
            None => InMemorySchedules::new(),
        });
        let reservations = Arc::new(InMemoryReservations::new());
        let desk = desk_in(space_id);
        let desks = Arc::new(InMemoryDesks::with(desk.clone()));

        let engine = AvailabilityEngine::new(schedules, reservations.clone());
        let workflow = ReservationWorkflow::new(
            engine,
            desks.clone(),
            reservations.clone(),
            Arc::new(FixedClock(today())),
        );

        Fixture {
            workflow,
            reservations,
            desks,
            desk,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_schedule(Some(WeeklySchedule::default()))
    }

    #[tokio::test]
    async fn test_submit_creates_pending_reservation() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-01")
            .await
            .unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.guest_id, Some(guest.id));
        assert_eq!(
            reservation.reservation_date,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
        assert!(fx.reservations.get(reservation.id).is_some());
    }

    #[tokio::test]
    async fn test_submit_strips_time_of_day_from_timestamp_input() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-01T18:45:00+02:00")
            .await
            .unwrap();

        assert_eq!(
            reservation.reservation_date,
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_garbage_date() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "someday")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidDate));
    }

    #[tokio::test]
    async fn test_submit_rejects_past_date_before_consulting_the_engine() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        // Desk disabled too: the past-date gate must still win, proving it
        // runs before any engine check.
        fx.desks
            .set_availability(fx.desk.id, false)
            .await
            .unwrap();

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-08-06")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DateInPast));
    }

    #[tokio::test]
    async fn test_submit_on_disabled_desk_is_denied() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        fx.desks
            .set_availability(fx.desk.id, false)
            .await
            .unwrap();

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-01")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DeskDisabled));
    }

    #[tokio::test]
    async fn test_submit_on_today_is_not_in_the_past() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        // 2026-08-07 is a Friday, open in the default schedule
        let reservation = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-08-07")
            .await
            .unwrap();
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_closed_saturday_is_denied() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-05")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::DayClosed));
    }

    #[tokio::test]
    async fn test_submit_without_schedule_is_denied() {
        let fx = fixture_with_schedule(None);
        let guest = Actor::guest(Uuid::new_v4());

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-01")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NoSchedule));
    }

    #[tokio::test]
    async fn test_second_submission_for_same_slot_is_already_booked() {
        let fx = fixture();
        let first = Actor::guest(Uuid::new_v4());
        let second = Actor::guest(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &first, "2026-09-01")
            .await
            .unwrap();
        // Confirmed or pending makes no difference; both block the slot
        fx.reservations
            .update_status(reservation.id, ReservationStatus::Confirmed)
            .await
            .unwrap();

        let err = fx
            .workflow
            .submit(fx.desk.id, &second, "2026-09-01")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AlreadyBooked));
    }

    #[tokio::test]
    async fn test_cancelled_reservation_frees_the_slot_for_resubmission() {
        let fx = fixture();
        let first = Actor::guest(Uuid::new_v4());
        let second = Actor::guest(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &first, "2026-09-01")
            .await
            .unwrap();
        fx.workflow.cancel(reservation.id, &first).await.unwrap();

        let replacement = fx
            .workflow
            .submit(fx.desk.id, &second, "2026-09-01")
            .await
            .unwrap();
        assert_eq!(replacement.status, ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn test_lost_race_at_commit_surfaces_as_persistence_conflict() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        fx.reservations
            .insert(Reservation::new(fx.desk.id, Uuid::new_v4(), tuesday()));
        // Pre-check reports the slot free; the create must still fail on
        // the uniqueness rule.
        fx.reservations.simulate_race_window();

        let err = fx
            .workflow
            .submit(fx.desk.id, &guest, "2026-09-01")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::PersistenceConflict));
    }

    #[tokio::test]
    async fn test_submit_unknown_desk_is_not_found() {
        let fx = fixture();
        let guest = Actor::guest(Uuid::new_v4());

        let err = fx
            .workflow
            .submit(Uuid::new_v4(), &guest, "2026-09-01")
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound("desk")));
    }

    #[tokio::test]
    async fn test_cancel_requires_the_reserving_guest() {
        let fx = fixture();
        let owner = Actor::guest(Uuid::new_v4());
        let stranger = Actor::guest(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();

        let err = fx
            .workflow
            .cancel(reservation.id, &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AuthDenied));

        // Admins delete, they do not cancel on the guest's behalf
        let err = fx
            .workflow
            .cancel(reservation.id, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AuthDenied));

        let cancelled = fx.workflow.cancel(reservation.id, &owner).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let fx = fixture();
        let owner = Actor::guest(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();

        fx.workflow.cancel(reservation.id, &owner).await.unwrap();
        let again = fx.workflow.cancel(reservation.id, &owner).await.unwrap();

        assert_eq!(again.status, ReservationStatus::Cancelled);
        assert_eq!(
            fx.reservations.get(reservation.id).unwrap().status,
            ReservationStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_confirm_is_admin_only_and_tolerates_repeats() {
        let fx = fixture();
        let owner = Actor::guest(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();

        let err = fx
            .workflow
            .confirm(reservation.id, &owner)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::AuthDenied));

        let confirmed = fx.workflow.confirm(reservation.id, &admin).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);

        // Second confirm is a no-op
        let again = fx.workflow.confirm(reservation.id, &admin).await.unwrap();
        assert_eq!(again.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_confirm_after_cancel_is_an_invalid_transition() {
        let fx = fixture();
        let owner = Actor::guest(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());

        let reservation = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();
        fx.workflow.cancel(reservation.id, &owner).await.unwrap();

        let err = fx
            .workflow
            .confirm(reservation.id, &admin)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition(ReservationStatus::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_delete_allowed_for_owner_and_admin_only() {
        let fx = fixture();
        let owner = Actor::guest(Uuid::new_v4());
        let stranger = Actor::guest(Uuid::new_v4());
        let admin = Actor::admin(Uuid::new_v4());

        let first = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();

        let err = fx.workflow.delete(first.id, &stranger).await.unwrap_err();
        assert!(matches!(err, BookingError::AuthDenied));

        fx.workflow.delete(first.id, &owner).await.unwrap();
        assert!(fx.reservations.get(first.id).is_none());

        // Deletion erases the record, so the slot opens again
        let second = fx
            .workflow
            .submit(fx.desk.id, &owner, "2026-09-01")
            .await
            .unwrap();
        fx.workflow.delete(second.id, &admin).await.unwrap();
        assert!(fx.reservations.get(second.id).is_none());
    }

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }
}
