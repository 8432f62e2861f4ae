//! PostgreSQL connection pool initialization.
//!
//! The pool is created once at startup from `DATABASE_URL` and handed to
//! [`crate::state::AppState`]; handlers receive it through axum state
//! rather than any module-level global, so there is a single documented
//! acquire point (here) and teardown happens when the process exits.

use sqlx::PgPool;
use std::env;

/// Connects to PostgreSQL and returns a cloneable pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable; the
/// server cannot do anything useful without its store.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
