pub mod actor;
pub mod calendar;
pub mod repository;
pub mod reservation;
pub mod schedule;
pub mod space;

pub use actor::Actor;
pub use repository::{
    DeskRepository, ReservationRepository, ScheduleRepository, SpaceRepository, StoreError,
};
pub use reservation::{Reservation, ReservationStatus};
pub use schedule::WeeklySchedule;
pub use space::{Desk, Space};
