use auth::TokenPair;
use auth::TokenType;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::middleware::verify_and_resolve;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token (from its cookie) for a fresh token pair.
///
/// Both tokens rotate: the response carries a new access token and the
/// cookie is replaced with a new refresh token.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshResponseData>), ApiError> {
    // Extraction failure short-circuits before any verification runs.
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("No refresh token provided".to_string()))?
        .value()
        .to_string();

    let user = verify_and_resolve(&state, &token, TokenType::Refresh).await?;

    let TokenPair {
        access_token,
        refresh_token,
    } = state
        .account_service
        .refresh(&user)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.add(refresh_cookie(
        refresh_token,
        state.authenticator.refresh_ttl().num_seconds(),
        state.secure_cookies,
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            RefreshResponseData {
                access_token,
                token_type: "bearer".to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub token_type: String,
}
