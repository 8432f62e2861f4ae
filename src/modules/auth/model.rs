use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::modules::users::model::SanitizedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Name must be between 3 and 50 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = validate_password_strength)
    )]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyTwoFactorRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(
        length(equal = 6, message = "Code must be 6 digits"),
        custom(function = validate_numeric_code)
    )]
    pub code: String,
}

/// Body of a successful login: the code went out, tokens have not.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPendingResponse {
    pub email: String,
    /// Minutes until the emailed code expires.
    pub code_expires: i64,
}

/// Body of a successful 2FA verification.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorResponse {
    pub user: SanitizedUser,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must contain an uppercase letter, a lowercase letter and a digit".into(),
        ))
    }
}

fn validate_numeric_code(code: &str) -> Result<(), ValidationError> {
    if code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric_code")
            .with_message("Code must contain only digits".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_accepts_strong_password() {
        let dto = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: "Abcdef12".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn register_request_rejects_weak_passwords() {
        for password in ["abcdefgh", "ABCDEFGH", "12345678", "Abcdefgh", "Short1"] {
            let dto = RegisterRequest {
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                password: password.to_string(),
            };
            assert!(dto.validate().is_err(), "expected {password:?} to fail");
        }
    }

    #[test]
    fn verify_request_requires_six_digits() {
        let ok = VerifyTwoFactorRequest {
            email: "ana@x.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(ok.validate().is_ok());

        for code in ["12345", "1234567", "12345a", "abcdef"] {
            let dto = VerifyTwoFactorRequest {
                email: "ana@x.com".to_string(),
                code: code.to_string(),
            };
            assert!(dto.validate().is_err(), "expected {code:?} to fail");
        }
    }
}
