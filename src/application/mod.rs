pub mod services;

pub use services::{ReservationService, RoomLocks};
