use axum_extra::extract::cookie::Cookie;
use time::Duration;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Cookie path: the refresh token is only ever sent to auth endpoints.
const COOKIE_PATH: &str = "/api/v1/auth";

/// Build the http-only refresh-token cookie set at login and refresh.
///
/// `Max-Age` matches the refresh token TTL, so the cookie and the token it
/// carries expire together.
pub fn refresh_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, token))
        .path(COOKIE_PATH)
        .http_only(true)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

/// Build the cookie that instructs the client to delete its refresh token.
///
/// `Max-Age=0` is the only logout action available: the tokens themselves
/// are self-contained and stay valid until natural expiry.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .path(COOKIE_PATH)
        .http_only(true)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}
