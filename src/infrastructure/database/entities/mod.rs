//! Database entities module

pub mod reservation;

pub use reservation::Entity as Reservation;
