use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use serde_json::json;

use crate::auth::{AUTH_COOKIE_NAME, CurrentSession};
use crate::routes::AppState;

/// GET /login - Where to sign in
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": "Iniciá sesión para usar el planificador del comedor.",
        "login_url": state.config.auth.login_url,
    }))
}

/// GET /session - Whether a user is signed in
pub async fn session(CurrentSession(session): CurrentSession) -> impl IntoResponse {
    Json(json!({
        "signed_in": session.is_some(),
        "subject": session.map(|s| s.subject),
    }))
}

/// POST /logout - Clear session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/"));
    (jar, Redirect::to("/login"))
}
