//! Application services

mod reservation;
mod room_locks;

pub use reservation::ReservationService;
pub use room_locks::RoomLocks;
