use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::SanitizedUser;

const SANITIZED_COLUMNS: &str = "id, name, email, is_verified, role, created_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<SanitizedUser, AppError> {
        Self::find_sanitized(db, user_id).await?.ok_or_else(|| {
            debug!(user.id = %user_id, "User not found");
            AppError::UserNotFound
        })
    }

    /// Lookup used by the auth middleware. The query projects only the
    /// sanitized columns, so credential and pending-code fields never leave
    /// the store for this path.
    pub async fn find_sanitized(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<SanitizedUser>, AppError> {
        let user = sqlx::query_as::<_, SanitizedUser>(&format!(
            "SELECT {SANITIZED_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
