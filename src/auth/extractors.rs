use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};

use super::{jwt::JwtKeys, repo::User};
use crate::{error::ApiError, state::AppState};

/// Resolves the bearer token on a request into the user who owns it.
///
/// Every failure collapses into [`ApiError::Unauthorized`]; the cause is only logged.
pub struct CurrentUser(pub User);

/// Pulls the token out of `Authorization: Bearer <token>`. The scheme is
/// matched case-insensitively.
pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                debug!("missing or malformed Authorization header");
                ApiError::Unauthorized
            })?;

        let claims = JwtKeys::from_ref(state).verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::Unauthorized
        })?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            warn!(sub = %claims.sub, "token subject is not a user id");
            ApiError::Unauthorized
        })?;

        let user = User::find_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id, "token subject no longer exists");
                ApiError::Unauthorized
            })?;

        Ok(CurrentUser(user))
    }
}
