use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub mod roles {
    pub const USER: &str = "user";
    pub const ADMIN: &str = "admin";
}

/// Full account row, credential and verification state included.
///
/// Only the auth service reads this shape; everything that leaves the
/// process goes through [`SanitizedUser`].
#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_verified: bool,
    pub two_factor_code: Option<String>,
    pub two_factor_expires: Option<DateTime<Utc>>,
    pub login_attempts: i32,
    pub lock_until: Option<DateTime<Utc>>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account view without password or two-factor columns. Returned by the
/// profile endpoint and attached to requests by the auth middleware.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_verified: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for SanitizedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
