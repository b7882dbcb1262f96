use std::sync::Arc;

use deskhive_booking::{AvailabilityEngine, ReservationWorkflow};
use deskhive_domain::repository::{DeskRepository, ReservationRepository, SpaceRepository};
use deskhive_store::app_config::BookingRules;
use deskhive_store::{DbClient, RedisClient};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbClient>,
    pub redis: Arc<RedisClient>,
    pub spaces: Arc<dyn SpaceRepository>,
    pub desks: Arc<dyn DeskRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub engine: AvailabilityEngine,
    pub workflow: Arc<ReservationWorkflow>,
    pub auth: AuthConfig,
    pub booking_rules: BookingRules,
}
