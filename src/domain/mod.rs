//! Domain layer: booking entities, invariants and the store interface.

pub mod error;
pub mod reservation;

pub use error::{DomainError, DomainResult};
pub use reservation::{Reservation, ReservationRepository};
