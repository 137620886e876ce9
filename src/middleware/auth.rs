//! Request authentication.
//!
//! [`authenticate`] runs in front of every protected route:
//!
//! 1. no bearer token → 401
//! 2. token with a bad signature, a non-HMAC algorithm or past expiry → 401
//! 3. valid token → the caller is resolved from the `role` cookie when it
//!    decrypts and names the token's email, otherwise from the database, in
//!    which case a fresh cookie is attached to the response
//!
//! The resolved [`AuthKey`] is stored in the request extensions and read back
//! with the [`AuthUser`] extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use journal_auth::{
    AuthKey, ROLE_COOKIE, ROLE_COOKIE_MAX_AGE_SECS, RoleCookieCodec, bearer_token, verify_token,
};
use journal_core::AppError;
use journal_db::DbPool;
use journal_observability::{CookieLookup, track_role_cookie_lookup};

use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The caller resolved by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthKey);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthKey>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("request was not authenticated"))
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;

    let claims = verify_token(token, &state.secret).inspect_err(|err| {
        tracing::warn!(error = %err, "rejected bearer token");
    })?;

    let cookie = jar.get(ROLE_COOKIE).map(|cookie| cookie.value().to_owned());
    let (key, sealed) =
        resolve_key(&state.db, &state.cookie_codec, &claims.email, cookie.as_deref()).await?;

    req.extensions_mut().insert(key);
    let response = next.run(req).await;

    Ok(match sealed {
        Some(value) => (jar.add(role_cookie(value)), response).into_response(),
        None => response,
    })
}

/// Resolves the caller for `email`, preferring the cached cookie.
///
/// Returns the key and, when the database had to be consulted, the sealed
/// value of a replacement cookie.
pub async fn resolve_key(
    db: &DbPool,
    codec: &RoleCookieCodec,
    email: &str,
    cookie: Option<&str>,
) -> Result<(AuthKey, Option<String>), AppError> {
    match cookie.map(|value| codec.open(value)) {
        Some(Ok(key)) if key.email == email => {
            track_role_cookie_lookup(CookieLookup::Hit);
            return Ok((key, None));
        }
        Some(Ok(key)) => {
            tracing::debug!(cookie_email = %key.email, "role cookie belongs to another user");
            track_role_cookie_lookup(CookieLookup::Stale);
        }
        Some(Err(err)) => {
            tracing::debug!(error = %err, "role cookie rejected");
            track_role_cookie_lookup(CookieLookup::Stale);
        }
        None => track_role_cookie_lookup(CookieLookup::Miss),
    }

    let key = UserService::resolve_user_role(db, email)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "failed to resolve user role");
            AppError::unauthorized("failed to resolve user role")
        })?;

    let sealed = codec
        .seal(&key)
        .map_err(|err| AppError::unauthorized("failed to seal role cookie").with_source(err))?;

    Ok((key, Some(sealed)))
}

pub fn role_cookie(value: String) -> Cookie<'static> {
    Cookie::build((ROLE_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ROLE_COOKIE_MAX_AGE_SECS))
        .build()
}
