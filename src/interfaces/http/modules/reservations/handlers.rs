//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::ReservationService;
use crate::domain::reservation::narrow_room_id;
use crate::domain::{DomainError, DomainResult, Reservation};
use crate::interfaces::http::common::{
    ApiPath, ApiResult, ErrorResponse, MessageResponse, ValidatedJson,
};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/reservation/by-name/{name}",
    tag = "Reservations",
    params(("name" = String, Path, description = "Booking holder, exact match")),
    responses(
        (status = 200, description = "First matching reservation, or empty list", body = ReservationQueryResponse)
    )
)]
pub async fn get_reservation_by_name(
    State(state): State<ReservationAppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<ReservationQueryResponse> {
    let found = state.service.get_by_name(&name).await?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    get,
    path = "/reservation/by-room/{room_id}",
    tag = "Reservations",
    params(("room_id" = i64, Path, description = "Room number, 1 to 10")),
    responses(
        (status = 200, description = "First reservation of the room, or empty list", body = ReservationQueryResponse),
        (status = 400, description = "Room id out of range or not an integer", body = ErrorResponse)
    )
)]
pub async fn get_reservation_by_room(
    State(state): State<ReservationAppState>,
    ApiPath(raw_room_id): ApiPath<String>,
) -> ApiResult<ReservationQueryResponse> {
    let room_id = parse_room_id(&raw_room_id)?;
    let found = state.service.get_by_room(room_id).await?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    post,
    path = "/reservation",
    tag = "Reservations",
    request_body = ReservationDto,
    responses(
        (status = 200, description = "Reservation created", body = MessageResponse),
        (status = 400, description = "Invalid room or dates, room not available, or duplicate", body = ErrorResponse),
        (status = 422, description = "Malformed fields", body = ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<ReservationDto>,
) -> ApiResult<MessageResponse> {
    state.service.create(Reservation::try_from(request)?).await?;
    Ok(Json(MessageResponse::new("Reservation created")))
}

#[utoipa::path(
    put,
    path = "/reservation/update",
    tag = "Reservations",
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation moved to the new dates", body = MessageResponse),
        (status = 400, description = "Invalid room or dates, not found, or room not available", body = ErrorResponse),
        (status = 422, description = "Malformed fields", body = ErrorResponse)
    )
)]
pub async fn update_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<UpdateReservationRequest>,
) -> ApiResult<MessageResponse> {
    let reservation = Reservation::try_from(request.reservation)?;
    state
        .service
        .update(&reservation, request.new_start_date, request.new_end_date)
        .await?;
    Ok(Json(MessageResponse::new("Reservation updated")))
}

#[utoipa::path(
    delete,
    path = "/reservation/delete",
    tag = "Reservations",
    request_body = ReservationDto,
    responses(
        (status = 200, description = "Reservation deleted", body = MessageResponse),
        (status = 400, description = "Invalid room or dates, or not found", body = ErrorResponse),
        (status = 422, description = "Malformed fields", body = ErrorResponse)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<ReservationDto>,
) -> ApiResult<MessageResponse> {
    state.service.cancel(&Reservation::try_from(request)?).await?;
    // wire text keeps the double space
    Ok(Json(MessageResponse::new("Reservation  deleted")))
}

/// Integer text of any width; only non-integers are told apart from
/// out-of-range ids.
fn parse_room_id(raw: &str) -> DomainResult<i32> {
    let digits = raw.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::room_id_not_integer(raw));
    }
    match raw.parse::<i64>() {
        Ok(wide) => narrow_room_id(wide),
        Err(_) => Err(DomainError::invalid_room_id()),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::ReservationService;
    use crate::domain::ReservationRepository;
    use crate::infrastructure::storage::InMemoryReservationRepository;
    use crate::interfaces::http::router::create_api_router;
    use std::sync::Arc;

    fn app() -> Router {
        let repo: Arc<dyn ReservationRepository> = Arc::new(InMemoryReservationRepository::new());
        let service = Arc::new(ReservationService::new(repo.clone()));
        create_api_router(service, repo)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&b).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn alice() -> Value {
        json!({"name": "Alice", "start_date": "2024-03-01", "end_date": "2024-03-03", "room_id": 3})
    }

    #[tokio::test]
    async fn create_then_query() {
        let app = app();
        let (status, body) = call(&app, "POST", "/reservation", Some(alice())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Reservation created"}));

        let (status, body) = call(&app, "GET", "/reservation/by-name/Alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": [alice()]}));

        let (_, body) = call(&app, "GET", "/reservation/by-room/3", None).await;
        assert_eq!(body, json!({"result": [alice()]}));
    }

    #[tokio::test]
    async fn empty_lookups_return_empty_list() {
        let app = app();
        let (status, body) = call(&app, "GET", "/reservation/by-name/nobody", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": []}));

        let (status, body) = call(&app, "GET", "/reservation/by-room/10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": []}));
    }

    #[tokio::test]
    async fn invalid_room_is_bad_request() {
        let app = app();
        let (status, body) = call(&app, "GET", "/reservation/by-room/11", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Room id must be between 1 and 10"}));

        let mut r = alice();
        r["room_id"] = json!(0);
        let (status, body) = call(&app, "POST", "/reservation", Some(r)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Room id must be between 1 and 10");
    }

    #[tokio::test]
    async fn inverted_dates_are_bad_request() {
        let app = app();
        let mut r = alice();
        r["start_date"] = json!("2024-03-05");
        let (status, body) = call(&app, "POST", "/reservation", Some(r)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Start date must be before end date");
    }

    #[tokio::test]
    async fn overlapping_create_is_rejected() {
        let app = app();
        call(&app, "POST", "/reservation", Some(alice())).await;

        let bob = json!({"name": "Bob", "start_date": "2024-03-03", "end_date": "2024-03-04", "room_id": 3});
        let (status, body) = call(&app, "POST", "/reservation", Some(bob)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Room not avaliable");
    }

    #[tokio::test]
    async fn update_moves_and_reports_conflicts() {
        let app = app();
        call(&app, "POST", "/reservation", Some(alice())).await;

        let overlapping_self = json!({
            "reservation": alice(),
            "new_start_date": "2024-03-02",
            "new_end_date": "2024-03-05"
        });
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(overlapping_self)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Room not avaliable");

        let disjoint = json!({
            "reservation": alice(),
            "new_start_date": "2024-04-01",
            "new_end_date": "2024-04-02"
        });
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(disjoint.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Reservation updated"}));

        // old tuple is gone
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(disjoint)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Reservation not found");
    }

    #[tokio::test]
    async fn update_with_inverted_new_range() {
        let app = app();
        let req = json!({
            "reservation": alice(),
            "new_start_date": "2024-04-05",
            "new_end_date": "2024-04-01"
        });
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(req)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Start date must be before end date");
    }

    #[tokio::test]
    async fn delete_then_lookup_is_empty() {
        let app = app();
        call(&app, "POST", "/reservation", Some(alice())).await;

        let (status, body) = call(&app, "DELETE", "/reservation/delete", Some(alice())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "Reservation  deleted"}));

        let (_, body) = call(&app, "GET", "/reservation/by-name/Alice", None).await;
        assert_eq!(body, json!({"result": []}));

        let (status, body) = call(&app, "DELETE", "/reservation/delete", Some(alice())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Reservation not found");
    }

    #[tokio::test]
    async fn malformed_bodies() {
        let app = app();
        let bad_date = json!({"name": "A", "start_date": "03/01/2024", "end_date": "2024-03-03", "room_id": 1});
        let (status, _) = call(&app, "POST", "/reservation", Some(bad_date)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut empty_name = alice();
        empty_name["name"] = json!("");
        let (status, body) = call(&app, "POST", "/reservation", Some(empty_name)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "name: must not be empty");

        let nested = json!({
            "reservation": {"name": "", "start_date": "2024-03-01", "end_date": "2024-03-03", "room_id": 3},
            "new_start_date": "2024-04-01",
            "new_end_date": "2024-04-02"
        });
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(nested)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "reservation.name: must not be empty");
    }

    #[tokio::test]
    async fn oversized_room_id_hits_range_check() {
        let app = app();
        for uri in ["/reservation/by-room/99999999999", "/reservation/by-room/-99999999999999999999999"] {
            let (status, body) = call(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"detail": "Room id must be between 1 and 10"}));
        }

        let mut r = alice();
        r["room_id"] = json!(99_999_999_999i64);
        for (method, uri) in [("POST", "/reservation"), ("DELETE", "/reservation/delete")] {
            let (status, body) = call(&app, method, uri, Some(r.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["detail"], "Room id must be between 1 and 10");
        }
    }

    #[tokio::test]
    async fn non_numeric_room_path_has_json_detail() {
        let app = app();
        let (status, body) = call(&app, "GET", "/reservation/by-room/three", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Room id must be an integer, got 'three'");
    }

    #[tokio::test]
    async fn years_outside_four_digits_are_unprocessable() {
        let app = app();
        let mut far = alice();
        far["start_date"] = json!("9999-12-30");
        far["end_date"] = json!("+10000-01-05");
        let (status, body) = call(&app, "POST", "/reservation", Some(far)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "end_date: year must be between 1 and 9999");

        let req = json!({
            "reservation": alice(),
            "new_start_date": "0000-01-01",
            "new_end_date": "2024-04-02"
        });
        let (status, body) = call(&app, "PUT", "/reservation/update", Some(req)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "new_start_date: year must be between 1 and 9999");

        // nothing was stored
        let (_, body) = call(&app, "GET", "/reservation/by-room/3", None).await;
        assert_eq!(body, json!({"result": []}));
    }
}
