use std::{
    convert::Infallible,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{config::AuthConfig, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
    pub iss: String,
    pub sub: String,
}

/// Request extension set once the session cookie has been verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
    pub subject: String,
}

/// Sign a token the same way the identity provider does. Used by tooling and tests.
pub fn generate_token(config: &AuthConfig, sub: &str, lifetime_seconds: u64) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + lifetime_seconds,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: sub.to_owned(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify signature, expiry, issuer and audience.
pub fn validate_token(token: &str, config: &AuthConfig) -> anyhow::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

fn signed_in(jar: &CookieJar, config: &AuthConfig) -> Option<SignedIn> {
    let token = jar.get(AUTH_COOKIE_NAME)?.value();

    match validate_token(token, config) {
        Ok(claims) => Some(SignedIn {
            subject: claims.sub,
        }),
        Err(e) => {
            tracing::warn!("Invalid auth token: {e}");
            None
        }
    }
}

/// Gate for every planning route: no verified session, no access.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(session) = signed_in(&jar, &state.config.auth) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthenticated",
                "login": state.config.auth.login_url,
            })),
        )
            .into_response();
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}

/// The verified session, if any. Never rejects.
pub struct CurrentSession(pub Option<SignedIn>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(CurrentSession(signed_in(&jar, &state.config.auth)))
    }
}
