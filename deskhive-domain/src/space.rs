use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// A physical coworking location owned by a host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Space {
    pub fn new(host_id: Uuid, name: String, address: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            host_id,
            name,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A bookable unit within a Space. `is_available` is the host's master
/// switch, independent of the space's weekly schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Desk {
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub price_cents: i32,
    pub capacity: i32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Desk {
    pub fn new(space_id: Uuid, name: String, price_cents: i32, capacity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            space_id,
            name,
            price_cents,
            capacity,
            is_available: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_availability(&mut self, available: bool) {
        self.is_available = available;
        self.updated_at = Utc::now();
    }
}
