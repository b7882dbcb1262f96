pub mod app_config;
pub mod database;
mod error;
pub mod desk_repo;
pub mod redis_repo;
pub mod reservation_repo;
pub mod space_repo;

pub use app_config::Config;
pub use database::DbClient;
pub use desk_repo::PgDeskRepository;
pub use redis_repo::RedisClient;
pub use reservation_repo::PgReservationRepository;
pub use space_repo::PgSpaceRepository;
