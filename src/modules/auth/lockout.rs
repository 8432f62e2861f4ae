//! Account lockout policy.
//!
//! Pure decisions over `(login_attempts, lock_until, now)`; the orchestrator
//! persists whatever these functions decide. The threshold and duration come
//! from [`LockoutConfig`], never from call-site constants.

use chrono::{DateTime, Duration, Utc};

use crate::config::lockout::LockoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Open,
    Locked { remaining_minutes: i64 },
}

/// Checks whether an account is currently locked.
///
/// A `lock_until` in the past counts as no lock at all. Remaining time is
/// reported in minutes, rounded up, so a freshly imposed 10-minute lock
/// reads as 10.
pub fn check_lock(lock_until: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LockState {
    match lock_until {
        Some(until) if until > now => {
            let remaining_ms = (until - now).num_milliseconds();
            LockState::Locked {
                remaining_minutes: (remaining_ms + 59_999) / 60_000,
            }
        }
        _ => LockState::Open,
    }
}

/// State transition the store must apply after a failed password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureUpdate {
    /// Below the threshold: bump the counter.
    Increment { attempts: i32 },
    /// Threshold reached: impose a lock and reset the counter to zero.
    Lock { lock_until: DateTime<Utc> },
}

pub fn on_password_failure(
    attempts: i32,
    config: &LockoutConfig,
    now: DateTime<Utc>,
) -> FailureUpdate {
    let attempts = attempts + 1;
    if attempts >= config.max_attempts as i32 {
        FailureUpdate::Lock {
            lock_until: now + Duration::minutes(config.lock_minutes),
        }
    } else {
        FailureUpdate::Increment { attempts }
    }
}
