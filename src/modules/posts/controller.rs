use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{
    CreatePostRequest, PaginatedPostsResponse, Post, PostFilterParams, UpdatePostRequest,
};
use super::service::PostService;

/// Create a new post authored by the current user
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = Post),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Account not verified")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    let post = PostService::create_post(&state.db, user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Post created successfully", post)),
    ))
}

/// List available posts with pagination, filtering and search
#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, 1-100 (default 10)"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based (default 1)"),
        ("category" = Option<String>, Query, description = "Exact category filter"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or content"),
        ("sort_by" = Option<String>, Query, description = "title, price, updated_at or created_at"),
        ("sort_order" = Option<String>, Query, description = "asc or desc (default desc)")
    ),
    responses(
        (status = 200, description = "Posts fetched successfully", body = PaginatedPostsResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn get_posts(
    State(state): State<AppState>,
    Query(filters): Query<PostFilterParams>,
) -> Result<Json<ApiResponse<PaginatedPostsResponse>>, AppError> {
    let posts = PostService::get_posts(&state.db, filters).await?;
    Ok(Json(ApiResponse::ok("Posts fetched successfully", posts)))
}

/// Fetch a single available post
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post fetched successfully", body = Post),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = PostService::get_post(&state.db, id).await?;
    Ok(Json(ApiResponse::ok("Post fetched successfully", post)))
}

/// Update a post owned by the current user
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated successfully", body = Post),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the author of this post"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    let post = PostService::update_post(&state.db, id, user.id, &user.role, dto).await?;
    Ok(Json(ApiResponse::ok("Post updated successfully", post)))
}

/// Delete a post owned by the current user
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted successfully"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Not the author of this post"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    PostService::delete_post(&state.db, id, user.id, &user.role).await?;
    Ok(Json(ApiResponse::message("Post deleted successfully")))
}
