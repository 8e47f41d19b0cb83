use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::extract::WithRejection;
use innkeep_shared::pii::MaskedEmail;
use serde::Serialize;

use crate::{error::AppError, session::UserClaims, state::AppState};

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize)]
struct AuthResponse {
    success: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
}

/// `HttpOnly` session cookie. Production deployments serve the frontend from
/// another origin, which needs `Secure; SameSite=None`.
fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    let same_site = if secure { SameSite::None } else { SameSite::Strict };

    Cookie::build((TOKEN_COOKIE, value))
        .http_only(true)
        .path("/")
        .secure(secure)
        .same_site(same_site)
        .build()
}

async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(user), _): WithRejection<Json<UserClaims>, AppError>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let token = state.tokens.issue(&user)?;
    tracing::info!(user = %MaskedEmail(&user.email), "Session issued");

    let jar = jar.add(session_cookie(token, state.auth.secure_cookie));
    Ok((jar, Json(AuthResponse { success: true })))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<AuthResponse>) {
    let mut cookie = session_cookie(String::new(), state.auth.secure_cookie);
    cookie.make_removal();

    (jar.add(cookie), Json(AuthResponse { success: true }))
}
