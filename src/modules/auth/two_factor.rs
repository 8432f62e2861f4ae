//! One-time verification codes for the second login factor.
//!
//! Codes are 6-digit numerics from the OS entropy source, time-boxed by the
//! caller-provided ttl. Single use is enforced by the auth service, which
//! clears a code the moment it is consumed and overwrites it on every new
//! login attempt.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::rngs::OsRng;

/// Uniform over [100000, 999999].
pub fn generate_code() -> String {
    OsRng.gen_range(100_000..=999_999).to_string()
}

pub fn expiry_from(now: DateTime<Utc>, ttl_minutes: i64) -> DateTime<Utc> {
    now + Duration::minutes(ttl_minutes)
}

/// Strict: a code presented exactly at its expiry instant is still valid.
pub fn is_expired(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expiry
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    Valid,
    Expired,
    Mismatch,
}

/// Expiry is evaluated before the comparison, so a stale code reports
/// `Expired` even when it would also mismatch.
pub fn check_code(
    submitted: &str,
    stored: &str,
    expiry: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CodeCheck {
    if is_expired(expiry, now) {
        return CodeCheck::Expired;
    }
    if submitted != stored {
        return CodeCheck::Mismatch;
    }
    CodeCheck::Valid
}
