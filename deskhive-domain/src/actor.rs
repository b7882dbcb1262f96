use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity performing an operation. Always passed
/// explicitly into the workflow; the core never reads ambient auth state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    pub fn guest(id: Uuid) -> Self {
        Self { id, is_admin: false }
    }

    pub fn admin(id: Uuid) -> Self {
        Self { id, is_admin: true }
    }
}
