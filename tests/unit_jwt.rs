use chrono::Utc;
use inkpost::config::jwt::JwtConfig;
use inkpost::utils::errors::AppError;
use inkpost::utils::jwt::{TokenKind, create_access_token, create_refresh_token, verify_token};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test_access_secret_for_testing_purposes".to_string(),
        refresh_secret: Some("test_refresh_secret_for_testing_purposes".to_string()),
        access_expiry: 900,
        refresh_expiry: 518_400,
        issuer: "inkpost-api".to_string(),
        audience: "inkpost-users".to_string(),
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_access_token(user_id, "test@example.com", "user", &jwt_config);

    assert!(result.is_ok());
    let token = result.unwrap();
    assert!(!token.is_empty());
}

#[test]
fn test_access_token_round_trip() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "test@example.com", "admin", &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email.as_deref(), Some("test@example.com"));
    assert_eq!(claims.role.as_deref(), Some("admin"));
    assert_eq!(claims.kind, Some(TokenKind::Access));
    assert_eq!(claims.iss, "inkpost-api");
    assert_eq!(claims.aud, "inkpost-users");
}

#[test]
fn test_refresh_token_carries_subject_only() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_refresh_token(user_id, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, None);
    assert_eq!(claims.role, None);
    assert_eq!(claims.kind, Some(TokenKind::Refresh));
}

#[test]
fn test_refresh_token_falls_back_to_access_secret() {
    let jwt_config = JwtConfig {
        refresh_secret: None,
        ..get_test_jwt_config()
    };
    let user_id = Uuid::new_v4();

    let token = create_refresh_token(user_id, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.kind, Some(TokenKind::Refresh));
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let other_config = JwtConfig {
        access_secret: "a_completely_different_secret".to_string(),
        refresh_secret: None,
        ..get_test_jwt_config()
    };
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "test@example.com", "user", &other_config).unwrap();
    let result = verify_token(&token, &jwt_config);

    assert!(matches!(result, Err(AppError::TokenInvalid)));
}

#[test]
fn test_verify_token_garbage_input() {
    let jwt_config = get_test_jwt_config();

    let result = verify_token("not.a.token", &jwt_config);

    assert!(matches!(result, Err(AppError::TokenInvalid)));
}

#[derive(Serialize)]
struct RawClaims<'a> {
    sub: String,
    email: Option<&'a str>,
    role: Option<&'a str>,
    iss: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

fn sign_raw(claims: &RawClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp();

    // Well past the default validation leeway.
    let claims = RawClaims {
        sub: Uuid::new_v4().to_string(),
        email: Some("test@example.com"),
        role: Some("user"),
        iss: "inkpost-api",
        aud: "inkpost-users",
        exp: now - 3600,
        iat: now - 7200,
    };
    let token = sign_raw(&claims, &jwt_config.access_secret);

    let result = verify_token(&token, &jwt_config);

    assert!(matches!(result, Err(AppError::TokenExpired)));
}

#[test]
fn test_legacy_token_without_kind_accepted_on_access_secret() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp();

    let claims = RawClaims {
        sub: Uuid::new_v4().to_string(),
        email: Some("legacy@example.com"),
        role: Some("user"),
        iss: "inkpost-api",
        aud: "inkpost-users",
        exp: now + 900,
        iat: now,
    };
    let token = sign_raw(&claims, &jwt_config.access_secret);

    let verified = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(verified.kind, None);
    assert_eq!(verified.email.as_deref(), Some("legacy@example.com"));
}

#[test]
fn test_legacy_token_without_kind_accepted_on_refresh_secret() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp();

    let claims = RawClaims {
        sub: Uuid::new_v4().to_string(),
        email: None,
        role: None,
        iss: "inkpost-api",
        aud: "inkpost-users",
        exp: now + 900,
        iat: now,
    };
    let token = sign_raw(&claims, jwt_config.refresh_secret.as_deref().unwrap());

    let verified = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(verified.kind, None);
    assert_eq!(verified.email, None);
}

#[test]
fn test_verify_token_wrong_audience() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp();

    let claims = RawClaims {
        sub: Uuid::new_v4().to_string(),
        email: Some("test@example.com"),
        role: Some("user"),
        iss: "inkpost-api",
        aud: "someone-else",
        exp: now + 900,
        iat: now,
    };
    let token = sign_raw(&claims, &jwt_config.access_secret);

    assert!(verify_token(&token, &jwt_config).is_err());
}
