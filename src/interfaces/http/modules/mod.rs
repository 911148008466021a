pub mod health;
pub mod request_id;
pub mod reservations;
