use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

use crate::modules::users::model::SanitizedUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenKind, verify_token};

/// Extractor that validates the bearer token and loads the authenticated
/// user. Protected handlers take this as an argument; the loaded user is
/// re-read from the store so revoked or unverified accounts are rejected
/// even while their tokens are still live.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SanitizedUser);

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::Unauthorized("Missing or malformed authorization header".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        // Only access tokens grant API access.
        if claims.kind == Some(TokenKind::Refresh) {
            return Err(AppError::Unauthorized(
                "Refresh tokens cannot be used for authentication".to_string(),
            ));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

        let user = UserService::find_sanitized(&state.db, user_id)
            .await?
            .ok_or_else(|| {
                debug!(user.id = %user_id, "Token subject no longer exists");
                AppError::Unauthorized("User not found or inactive".to_string())
            })?;

        if !user.is_verified {
            return Err(AppError::Forbidden(
                "Account is not verified".to_string(),
            ));
        }

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(Some("bearer abc")), None);
    }

    #[test]
    fn rejects_empty_or_missing() {
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(None), None);
    }
}
