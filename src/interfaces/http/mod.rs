//! HTTP REST API interfaces
//!
//! - `common`: Error mapping, response bodies and the validating JSON extractor
//! - `modules`: Request handlers per resource, plus request-id middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
