use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation status in the lifecycle. Stored as a small integer:
/// PENDING=0, CONFIRMED=1, CANCELLED=2.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_i16(&self) -> i16 {
        match self {
            ReservationStatus::Pending => 0,
            ReservationStatus::Confirmed => 1,
            ReservationStatus::Cancelled => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(ReservationStatus::Pending),
            1 => Some(ReservationStatus::Confirmed),
            2 => Some(ReservationStatus::Cancelled),
            _ => None,
        }
    }
}

/// A guest's claim on a desk for one calendar date. The date is a pure
/// calendar date; time-of-day never enters the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub desk_id: Uuid,
    pub guest_id: Option<Uuid>,
    pub reservation_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(desk_id: Uuid, guest_id: Uuid, reservation_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            desk_id,
            guest_id: Some(guest_id),
            reservation_date,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update reservation status
    pub fn update_status(&mut self, new_status: ReservationStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }

    /// An active reservation blocks the (desk, date) slot
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_integer_mapping_round_trips() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::from_i16(status.as_i16()), Some(status));
        }
        assert_eq!(ReservationStatus::from_i16(3), None);
    }

    #[test]
    fn test_cancelled_reservation_is_not_active() {
        let mut reservation = Reservation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        );
        assert!(reservation.is_active());

        reservation.update_status(ReservationStatus::Cancelled);
        assert!(!reservation.is_active());
    }
}
