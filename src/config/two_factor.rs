use std::env;

#[derive(Clone, Debug)]
pub struct TwoFactorConfig {
    /// Minutes a one-time code stays valid after issuance.
    pub code_ttl_minutes: i64,
}

impl TwoFactorConfig {
    pub fn from_env() -> Self {
        Self {
            code_ttl_minutes: env::var("TWO_FACTOR_CODE_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for TwoFactorConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: 10,
        }
    }
}
