use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::config::lockout::LockoutConfig;
use crate::config::two_factor::TwoFactorConfig;
use crate::utils::email::EmailService;

/// Shared handles for every request: the store pool, the mailer and the
/// parsed configuration. Handlers reach the database only through `db`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub lockout_config: LockoutConfig,
    pub two_factor_config: TwoFactorConfig,
    pub cors_config: CorsConfig,
    pub email: EmailService,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        lockout_config: LockoutConfig::from_env(),
        two_factor_config: TwoFactorConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        email: EmailService::new(EmailConfig::from_env()),
    }
}
