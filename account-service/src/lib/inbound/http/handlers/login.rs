use auth::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::cookies::refresh_cookie;
use crate::inbound::http::router::AppState;

/// Login: verify credentials, return the access token in the body and the
/// refresh token in an http-only cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

    let session = state
        .account_service
        .login(Credentials {
            email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)?;

    let TokenPair {
        access_token,
        refresh_token,
    } = session.tokens;

    let jar = jar.add(refresh_cookie(
        refresh_token,
        state.authenticator.refresh_ttl().num_seconds(),
        state.secure_cookies,
    ));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                access_token,
                token_type: "bearer".to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
