//! # Room Booking Service
//!
//! HTTP service for reserving rooms 1 to 10 over inclusive date ranges.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Reservation entity, booking rules and the store port
//! - **application**: Reservation service (use cases) and per-room locks
//! - **infrastructure**: SQLite store (SeaORM) and in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime lifecycle (startup, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export store types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryReservationRepository, SeaOrmReservationRepository,
};

// Re-export API router
pub use interfaces::http::create_api_router;
