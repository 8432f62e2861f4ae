use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, register, verify_two_factor};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify-2fa", post(verify_two_factor))
}
