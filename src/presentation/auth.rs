use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::UserId;
use crate::presentation::handlers::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Owner identity for a request. Token verification happens at the upstream
/// gateway; this service trusts the `x-user-id` header it forwards and
/// rejects requests without one.
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());

        match user_id {
            Some(id) => Ok(AuthenticatedUser(UserId::new(id))),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: format!("Missing {} header", USER_ID_HEADER),
                }),
            )
                .into_response()),
        }
    }
}
