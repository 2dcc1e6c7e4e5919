use auth::TokenType;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated user through request handling
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Authentication gate for bearer-protected endpoints.
///
/// Extracts the bearer token, validates it as an access token, resolves
/// the subject to a user record, and stores the result in request
/// extensions. Every failure surfaces as the same 401 shape.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).map_err(|e| e.into_response())?;

    let user = verify_and_resolve(&state, token, TokenType::Access)
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

/// Validate a token of the expected type and resolve its subject.
///
/// Shared between the bearer middleware (access tokens) and the refresh
/// handler (refresh tokens from the cookie). The codec's finer-grained
/// failure is logged here; callers receive one uniform error.
pub async fn verify_and_resolve(
    state: &AppState,
    token: &str,
    expected_type: TokenType,
) -> Result<User, ApiError> {
    let claims = state
        .authenticator
        .verify(token, expected_type)
        .map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user id");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    state
        .account_service
        .resolve_subject(&user_id)
        .await
        .map_err(ApiError::from)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
