use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::{jwt::JwtKeys, repo_types::User};
use crate::{error::AppError, state::AppState};

/// Resolves `Authorization: Bearer <token>` to a stored user.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Auth("Missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .ok_or_else(|| AppError::Auth("Invalid Authorization header".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::Auth("Invalid token".into())
        })?;

        let user = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(sub = %claims.sub, "token subject has no user");
                AppError::Auth("User not found".into())
            })?;

        Ok(CurrentUser(user))
    }
}
