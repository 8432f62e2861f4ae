use chrono::{Duration, Utc};
use inkpost::config::lockout::LockoutConfig;
use inkpost::modules::auth::lockout::{
    FailureUpdate, LockState, check_lock, on_password_failure,
};

fn get_test_config() -> LockoutConfig {
    LockoutConfig {
        max_attempts: 3,
        lock_minutes: 10,
    }
}

#[test]
fn test_no_lock_when_never_locked() {
    let now = Utc::now();
    assert_eq!(check_lock(None, now), LockState::Open);
}

#[test]
fn test_expired_lock_is_open() {
    let now = Utc::now();
    let past = now - Duration::minutes(1);
    assert_eq!(check_lock(Some(past), now), LockState::Open);
}

#[test]
fn test_fresh_lock_reports_full_duration() {
    let now = Utc::now();
    let until = now + Duration::minutes(10);
    assert_eq!(
        check_lock(Some(until), now),
        LockState::Locked {
            remaining_minutes: 10
        }
    );
}

#[test]
fn test_remaining_minutes_round_up() {
    let now = Utc::now();

    let until = now + Duration::seconds(61);
    assert_eq!(
        check_lock(Some(until), now),
        LockState::Locked {
            remaining_minutes: 2
        }
    );

    let until = now + Duration::seconds(30);
    assert_eq!(
        check_lock(Some(until), now),
        LockState::Locked {
            remaining_minutes: 1
        }
    );
}

#[test]
fn test_failures_below_threshold_increment() {
    let config = get_test_config();
    let now = Utc::now();

    assert_eq!(
        on_password_failure(0, &config, now),
        FailureUpdate::Increment { attempts: 1 }
    );
    assert_eq!(
        on_password_failure(1, &config, now),
        FailureUpdate::Increment { attempts: 2 }
    );
}

#[test]
fn test_third_failure_locks_for_configured_duration() {
    let config = get_test_config();
    let now = Utc::now();

    let update = on_password_failure(2, &config, now);
    match update {
        FailureUpdate::Lock { lock_until } => {
            assert_eq!(lock_until, now + Duration::minutes(10));
        }
        other => panic!("expected lock, got {:?}", other),
    }
}

#[test]
fn test_threshold_respects_config() {
    let config = LockoutConfig {
        max_attempts: 5,
        lock_minutes: 30,
    };
    let now = Utc::now();

    assert_eq!(
        on_password_failure(2, &config, now),
        FailureUpdate::Increment { attempts: 3 }
    );
    assert_eq!(
        on_password_failure(4, &config, now),
        FailureUpdate::Lock {
            lock_until: now + Duration::minutes(30)
        }
    );
}
