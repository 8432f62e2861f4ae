use std::env;

/// Account lockout tuning. The threshold and duration are configuration,
/// not call-site constants.
#[derive(Clone, Debug)]
pub struct LockoutConfig {
    /// Failed password attempts that trigger a lock.
    pub max_attempts: u32,
    /// How long an imposed lock lasts.
    pub lock_minutes: i64,
}

impl LockoutConfig {
    pub fn from_env() -> Self {
        Self {
            max_attempts: env::var("LOCKOUT_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            lock_minutes: env::var("LOCKOUT_DURATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_minutes: 10,
        }
    }
}
