use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    /// Optional second secret for refresh tokens. When unset, refresh
    /// tokens are signed with the access secret.
    pub refresh_secret: Option<String>,
    /// Access token lifetime in seconds.
    pub access_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_expiry: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            refresh_secret: env::var("JWT_REFRESH_SECRET").ok(),
            access_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
            refresh_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(518_400), // 6 days
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "inkpost-api".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "inkpost-users".to_string()),
        }
    }

    /// Secret used to sign and verify refresh tokens.
    pub fn refresh_signing_secret(&self) -> &str {
        self.refresh_secret.as_deref().unwrap_or(&self.access_secret)
    }
}
