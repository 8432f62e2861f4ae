use inkpost::utils::password::{hash_password, verify_password};

#[test]
fn test_hash_password_success() {
    let password = "testpassword123";
    let result = hash_password(password);

    assert!(result.is_ok());
    let hash = result.unwrap();
    assert!(!hash.is_empty());
    assert_ne!(hash, password);
}

#[test]
fn test_hashes_differ_per_call() {
    let password = "testpassword123";
    let first = hash_password(password).unwrap();
    let second = hash_password(password).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_verify_password_matches() {
    let password = "Sup3rS3cret!";
    let hash = hash_password(password).unwrap();

    assert!(verify_password(password, &hash));
}

#[test]
fn test_verify_password_rejects_wrong_password() {
    let hash = hash_password("correct-password").unwrap();

    assert!(!verify_password("wrong-password", &hash));
}

#[test]
fn test_verify_password_rejects_malformed_digest() {
    assert!(!verify_password("whatever", "not-a-bcrypt-digest"));
    assert!(!verify_password("whatever", ""));
}
