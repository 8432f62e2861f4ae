use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::config::jwt::JwtConfig;
use crate::config::lockout::LockoutConfig;
use crate::config::two_factor::TwoFactorConfig;
use crate::modules::users::model::{SanitizedUser, User};
use crate::utils::email::{Delivery, EmailService, settle};
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token};
use crate::utils::password::{hash_password, verify_password};

use super::lockout::{FailureUpdate, LockState, check_lock, on_password_failure};
use super::model::{
    LoginPendingResponse, LoginRequest, RegisterRequest, TwoFactorResponse, VerifyTwoFactorRequest,
};
use super::two_factor::{CodeCheck, check_code, expiry_from, generate_code};

const USER_COLUMNS: &str = "id, name, email, password, is_verified, two_factor_code, \
                            two_factor_expires, login_attempts, lock_until, role, \
                            created_at, updated_at";

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The duplicate pre-check in [`AuthService::register`] races with
/// concurrent registrations; a loser of that race hits the `users.email`
/// unique constraint instead, which must answer the same way.
fn map_insert_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::UserExists,
        _ => AppError::from(err),
    }
}

async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

pub struct AuthService;

impl AuthService {
    /// Creates an unverified account. The welcome mail is best-effort: a
    /// delivery failure is logged and the registration still succeeds.
    #[instrument(skip_all, fields(user.email = %normalize_email(&dto.email)))]
    pub async fn register(
        db: &PgPool,
        email_service: &EmailService,
        dto: RegisterRequest,
    ) -> Result<SanitizedUser, AppError> {
        let email = normalize_email(&dto.email);
        let name = dto.name.trim().to_string();

        let existing = sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            debug!("Registration rejected, email already taken");
            return Err(AppError::UserExists);
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, SanitizedUser>(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, is_verified, role, created_at",
        )
        .bind(&name)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(map_insert_error)?;

        info!(user.id = %user.id, "User registered");

        settle(
            Delivery::BestEffort,
            email_service.send_welcome_email(&user.email, &user.name).await,
        )?;

        Ok(user)
    }

    /// First factor: password, gated by the lockout policy.
    ///
    /// On success a fresh one-time code replaces any previous pending code
    /// and must reach the user's inbox before this returns; code delivery
    /// is the only path the user has, so its failure fails the login.
    #[instrument(skip_all, fields(user.email = %normalize_email(&dto.email)))]
    pub async fn login(
        db: &PgPool,
        email_service: &EmailService,
        lockout_config: &LockoutConfig,
        two_factor_config: &TwoFactorConfig,
        dto: LoginRequest,
    ) -> Result<LoginPendingResponse, AppError> {
        let email = normalize_email(&dto.email);

        // Unknown email answers exactly like a wrong password.
        let Some(user) = find_by_email(db, &email).await? else {
            return Err(AppError::InvalidCredentials);
        };

        let now = Utc::now();

        if let LockState::Locked { remaining_minutes } = check_lock(user.lock_until, now) {
            debug!(user.id = %user.id, remaining_minutes, "Login rejected, account locked");
            return Err(AppError::AccountLocked { remaining_minutes });
        }

        if !verify_password(&dto.password, &user.password) {
            match on_password_failure(user.login_attempts, lockout_config, now) {
                FailureUpdate::Increment { attempts } => {
                    sqlx::query(
                        "UPDATE users SET login_attempts = $1, updated_at = NOW() WHERE id = $2",
                    )
                    .bind(attempts)
                    .bind(user.id)
                    .execute(db)
                    .await?;
                }
                FailureUpdate::Lock { lock_until } => {
                    warn!(user.id = %user.id, "Lockout threshold reached, locking account");
                    sqlx::query(
                        "UPDATE users SET login_attempts = 0, lock_until = $1, updated_at = NOW()
                         WHERE id = $2",
                    )
                    .bind(lock_until)
                    .bind(user.id)
                    .execute(db)
                    .await?;
                }
            }
            return Err(AppError::InvalidCredentials);
        }

        let code = generate_code();
        let expires = expiry_from(now, two_factor_config.code_ttl_minutes);

        // Password stage passed: store the new pending code (overwriting any
        // previous one) and clear the attempt counters in the same write.
        sqlx::query(
            "UPDATE users
             SET two_factor_code = $1, two_factor_expires = $2,
                 login_attempts = 0, lock_until = NULL, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&code)
        .bind(expires)
        .bind(user.id)
        .execute(db)
        .await?;

        settle(
            Delivery::Required,
            email_service
                .send_two_factor_code(
                    &user.email,
                    &user.name,
                    &code,
                    two_factor_config.code_ttl_minutes,
                )
                .await,
        )?;

        info!(user.id = %user.id, "Verification code issued");

        Ok(LoginPendingResponse {
            email: user.email,
            code_expires: two_factor_config.code_ttl_minutes,
        })
    }

    /// Second factor: exchanges a pending one-time code for tokens.
    ///
    /// A mismatching or expired submission leaves the pending code in place;
    /// it stays valid until consumed, overwritten by a new login, or expired.
    #[instrument(skip_all, fields(user.email = %normalize_email(&dto.email)))]
    pub async fn verify_two_factor(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: VerifyTwoFactorRequest,
    ) -> Result<TwoFactorResponse, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = find_by_email(db, &email).await? else {
            return Err(AppError::UserNotFound);
        };

        let (Some(stored_code), Some(expires)) = (&user.two_factor_code, user.two_factor_expires)
        else {
            return Err(AppError::NoPendingCode);
        };

        match check_code(&dto.code, stored_code, expires, Utc::now()) {
            CodeCheck::Expired => return Err(AppError::CodeExpired),
            CodeCheck::Mismatch => return Err(AppError::InvalidCode),
            CodeCheck::Valid => {}
        }

        sqlx::query(
            "UPDATE users
             SET is_verified = TRUE, two_factor_code = NULL, two_factor_expires = NULL,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user.id)
        .execute(db)
        .await?;

        let access_token = create_access_token(user.id, &user.email, &user.role, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, jwt_config)?;

        info!(user.id = %user.id, "Two-factor verification successful");

        let mut user: SanitizedUser = user.into();
        user.is_verified = true;

        Ok(TwoFactorResponse {
            user,
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[test]
    fn email_normalization_lowercases_and_trims() {
        assert_eq!(normalize_email("  Ana@X.Com "), "ana@x.com");
        assert_eq!(normalize_email("ana@x.com"), "ana@x.com");
    }

    #[derive(Debug)]
    struct StubDbError(ErrorKind);

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "stub database error")
        }
    }

    impl StdError for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_email_key\""
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn concurrent_duplicate_registration_maps_to_user_exists() {
        let err = sqlx::Error::Database(Box::new(StubDbError(ErrorKind::UniqueViolation)));
        assert!(matches!(map_insert_error(err), AppError::UserExists));
    }

    #[test]
    fn other_insert_failures_stay_internal() {
        let err = sqlx::Error::Database(Box::new(StubDbError(ErrorKind::Other)));
        assert!(matches!(map_insert_error(err), AppError::Internal(_)));

        assert!(matches!(
            map_insert_error(sqlx::Error::RowNotFound),
            AppError::Internal(_)
        ));
    }
}
