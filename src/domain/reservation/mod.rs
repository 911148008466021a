//! Reservation aggregate
//!
//! Contains the Reservation entity, booking invariants, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    format_date, narrow_room_id, parse_date, validate_date, validate_date_range,
    validate_room_id, Reservation, MAX_ROOM_ID, MAX_YEAR, MIN_ROOM_ID, MIN_YEAR,
};
pub use repository::ReservationRepository;
