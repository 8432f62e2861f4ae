use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::modules::users::model::SanitizedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{
    LoginPendingResponse, LoginRequest, RegisterRequest, TwoFactorResponse, VerifyTwoFactorRequest,
};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = SanitizedUser),
        (status = 400, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SanitizedUser>>), AppError> {
    let user = AuthService::register(&state.db, &state.email, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully", user)),
    ))
}

/// Check credentials and send a one-time verification code by email
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Verification code sent", body = LoginPendingResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 423, description = "Account temporarily locked"),
        (status = 500, description = "Verification email could not be sent")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginPendingResponse>>, AppError> {
    let pending = AuthService::login(
        &state.db,
        &state.email,
        &state.lockout_config,
        &state.two_factor_config,
        dto,
    )
    .await?;
    Ok(Json(ApiResponse::ok(
        "Verification code sent to email",
        pending,
    )))
}

/// Exchange the emailed code for access and refresh tokens
#[utoipa::path(
    post,
    path = "/api/auth/verify-2fa",
    request_body = VerifyTwoFactorRequest,
    responses(
        (status = 200, description = "Verification successful", body = TwoFactorResponse),
        (status = 400, description = "No pending, expired or invalid code"),
        (status = 404, description = "User not found")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_two_factor(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyTwoFactorRequest>,
) -> Result<Json<ApiResponse<TwoFactorResponse>>, AppError> {
    let response = AuthService::verify_two_factor(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(ApiResponse::ok(
        "Two-factor verification successful",
        response,
    )))
}
