use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{auth::TOKEN_COOKIE, error::AppError, session::Session, state::AppState};

// ============================================================================
// Session Guard
// ============================================================================

/// Admits only requests carrying a valid `token` cookie.
///
/// No cookie is a 401; a cookie that fails verification is a 403. On success
/// the caller's [`Session`] is placed in the request extensions.
pub async fn session_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from cookie
    let jar = CookieJar::from_headers(req.headers());
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Unauthorized access".to_string()))?;

    // 2. Verify signature and expiry
    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!("Rejected session token: {}", e);
        AppError::from(e)
    })?;

    // 3. Inject session into request extensions
    req.extensions_mut().insert(Session::from(claims));

    Ok(next.run(req).await)
}
