use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::SanitizedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;

use super::service::UserService;

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Profile retrieved", body = SanitizedUser),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SanitizedUser>>, AppError> {
    let user = UserService::get_profile(&state.db, id).await?;
    Ok(Json(ApiResponse::ok("Profile retrieved successfully", user)))
}
