//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ReservationService;
use crate::domain::ReservationRepository;
use crate::interfaces::http::common::{ErrorResponse, MessageResponse};
use crate::interfaces::http::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::{
    self, ReservationAppState, ReservationDto, ReservationQueryResponse, UpdateReservationRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::get_reservation_by_name,
        reservations::get_reservation_by_room,
        reservations::create_reservation,
        reservations::update_reservation,
        reservations::cancel_reservation,
    ),
    components(
        schemas(
            // Common
            MessageResponse,
            ErrorResponse,
            // Health
            HealthResponse,
            ComponentHealth,
            // Reservations
            ReservationDto,
            UpdateReservationRequest,
            ReservationQueryResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Reservations", description = "Room reservations: lookup, booking, rescheduling, cancellation"),
    ),
    info(
        title = "Room Booking API",
        version = "1.0.0",
        description = "REST API for booking rooms 1 to 10 over inclusive date ranges",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    service: Arc<ReservationService>,
    repo: Arc<dyn ReservationRepository>,
) -> Router {
    let reservation_state = ReservationAppState { service };

    let health_state = HealthState {
        repo,
        started_at: Arc::new(Instant::now()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let reservation_routes = Router::new()
        .route("/reservation", post(reservations::create_reservation))
        .route(
            "/reservation/by-name/{name}",
            get(reservations::get_reservation_by_name),
        )
        .route(
            "/reservation/by-room/{room_id}",
            get(reservations::get_reservation_by_room),
        )
        .route("/reservation/update", put(reservations::update_reservation))
        .route("/reservation/delete", delete(reservations::cancel_reservation))
        .with_state(reservation_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(reservation_routes)
        // Middleware
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
