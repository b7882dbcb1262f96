use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use deskhive_domain::repository::{ReservationRepository, ScheduleRepository, StoreError};
use deskhive_domain::space::Desk;

/// Why a desk cannot be booked for a given date. Ordering matters: the
/// engine reports the first failing check, cheapest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    DeskDisabled,
    NoSchedule,
    DayClosed,
    AlreadyBooked,
}

/// Outcome of an availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(reason) => Some(*reason),
        }
    }
}

/// Decides whether a desk is bookable on a calendar date.
///
/// Checks run in strict short-circuit order: desk master switch, schedule
/// presence (absence fails closed), day-of-week gate, then the reservation
/// ledger. The past-date rule lives in the workflow, which owns "now".
#[derive(Clone)]
pub struct AvailabilityEngine {
    schedules: Arc<dyn ScheduleRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityEngine {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            schedules,
            reservations,
        }
    }

    pub async fn can_book(&self, desk: &Desk, date: NaiveDate) -> Result<Decision, StoreError> {
        if !desk.is_available {
            return Ok(Decision::Denied(DenyReason::DeskDisabled));
        }

        let schedule = match self.schedules.find_space_schedule(desk.space_id).await? {
            Some(schedule) => schedule,
            None => return Ok(Decision::Denied(DenyReason::NoSchedule)),
        };

        if !schedule.is_open_on(date.weekday()) {
            return Ok(Decision::Denied(DenyReason::DayClosed));
        }

        if self
            .reservations
            .has_active_reservation(desk.id, date)
            .await?
        {
            return Ok(Decision::Denied(DenyReason::AlreadyBooked));
        }

        Ok(Decision::Allowed)
    }
}
