use chrono::{Duration, Utc};
use inkpost::modules::auth::two_factor::{
    CodeCheck, check_code, expiry_from, generate_code, is_expired,
};

#[test]
fn test_generated_codes_are_six_digits() {
    for _ in 0..100 {
        let code = generate_code();
        assert_eq!(code.len(), 6);
        let value: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
    }
}

#[test]
fn test_expiry_offsets_by_ttl() {
    let now = Utc::now();
    assert_eq!(expiry_from(now, 10), now + Duration::minutes(10));
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let now = Utc::now();

    assert!(!is_expired(now, now));
    assert!(is_expired(now - Duration::milliseconds(1), now));
    assert!(!is_expired(now + Duration::milliseconds(1), now));
}

#[test]
fn test_matching_code_within_ttl_is_valid() {
    let now = Utc::now();
    let expiry = expiry_from(now, 10);

    assert_eq!(check_code("123456", "123456", expiry, now), CodeCheck::Valid);
}

#[test]
fn test_wrong_code_is_mismatch() {
    let now = Utc::now();
    let expiry = expiry_from(now, 10);

    assert_eq!(
        check_code("123456", "654321", expiry, now),
        CodeCheck::Mismatch
    );
}

#[test]
fn test_expired_code_reported_before_mismatch() {
    let now = Utc::now();
    let expiry = now - Duration::minutes(1);

    // A stale code that also mismatches still reports expiry.
    assert_eq!(
        check_code("123456", "654321", expiry, now),
        CodeCheck::Expired
    );
    assert_eq!(
        check_code("123456", "123456", expiry, now),
        CodeCheck::Expired
    );
}
