use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;

/// Discriminates which secret a token was signed with.
///
/// Carried as a claim so verification can pick the right secret up front
/// instead of trying both. Tokens minted before this claim existed are
/// still accepted through the dual-secret fallback in [`verify_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims shared by access and refresh tokens.
///
/// Access tokens carry `email` and `role`; refresh tokens are restricted
/// to the subject id, so those fields deserialize as `None`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        role: Some(role.to_string()),
        kind: Some(TokenKind::Access),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: now + config.access_expiry as usize,
        iat: now,
    };

    sign(&claims, &config.access_secret)
}

/// Refresh token claims are restricted to the subject id.
pub fn create_refresh_token(user_id: Uuid, config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: None,
        role: None,
        kind: Some(TokenKind::Refresh),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        exp: now + config.refresh_expiry as usize,
        iat: now,
    };

    sign(&claims, config.refresh_signing_secret())
}

/// Verifies either token kind through a single entry point.
///
/// The `kind` claim is read with signature checks disabled, then the
/// matching secret alone is tried. Legacy tokens without a `kind` claim
/// fall back to trying the access secret first and the refresh secret
/// second, with the combined failure classified the same way.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    match peek_kind(token)? {
        Some(TokenKind::Access) => {
            decode_with(token, &config.access_secret, config).map_err(classify)
        }
        Some(TokenKind::Refresh) => {
            decode_with(token, config.refresh_signing_secret(), config).map_err(classify)
        }
        None => {
            let access_err = match decode_with(token, &config.access_secret, config) {
                Ok(claims) => return Ok(claims),
                Err(e) => e,
            };
            if config.refresh_secret.is_some() {
                match decode_with(token, config.refresh_signing_secret(), config) {
                    Ok(claims) => return Ok(claims),
                    Err(refresh_err) => Err(classify_pair(access_err, refresh_err)),
                }
            } else {
                Err(classify(access_err))
            }
        }
    }
}

fn sign(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

fn decode_with(
    token: &str,
    secret: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

/// Reads the `kind` claim without verifying the signature. A token too
/// malformed to peek at is rejected outright.
fn peek_kind(token: &str) -> Result<Option<TokenKind>, AppError> {
    let mut insecure = Validation::default();
    insecure.insecure_disable_signature_validation();
    insecure.validate_exp = false;
    insecure.validate_aud = false;
    insecure.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &insecure)
        .map(|data| data.claims.kind)
        .map_err(classify)
}

fn classify(err: jsonwebtoken::errors::Error) -> AppError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AppError::TokenInvalid,
        _ => AppError::TokenVerification,
    }
}

/// Legacy dual-secret path: expiry on either attempt wins the
/// classification, then malformed/signature mismatch, then the catch-all.
fn classify_pair(
    access_err: jsonwebtoken::errors::Error,
    refresh_err: jsonwebtoken::errors::Error,
) -> AppError {
    let expired = |e: &jsonwebtoken::errors::Error| {
        matches!(e.kind(), ErrorKind::ExpiredSignature)
    };
    if expired(&access_err) || expired(&refresh_err) {
        return AppError::TokenExpired;
    }
    match (classify(access_err), classify(refresh_err)) {
        (AppError::TokenInvalid, _) | (_, AppError::TokenInvalid) => AppError::TokenInvalid,
        _ => AppError::TokenVerification,
    }
}
