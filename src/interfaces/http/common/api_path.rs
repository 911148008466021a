//! Path extractor with JSON rejections
//!
//! `ApiPath<T>` works like `axum::extract::Path<T>`, but a failed
//! extraction is answered with the same `{"detail": ...}` body as every
//! other error of the API instead of axum's plain-text one.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use super::ErrorResponse;

pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err((
                rejection.status(),
                Json(ErrorResponse::new(rejection.body_text())),
            )),
        }
    }
}
