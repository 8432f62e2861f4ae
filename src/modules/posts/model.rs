use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
    pub price: f64,
    pub is_available: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row for list queries joining the author columns.
#[derive(Debug, sqlx::FromRow)]
pub struct PostWithAuthorRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image: Option<String>,
    pub price: f64,
    pub is_available: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: PostAuthor,
}

impl From<PostWithAuthorRow> for PostWithAuthor {
    fn from(row: PostWithAuthorRow) -> Self {
        Self {
            post: Post {
                id: row.id,
                title: row.title,
                content: row.content,
                category: row.category,
                image: row.image,
                price: row.price,
                is_available: row.is_available,
                author_id: row.author_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            author: PostAuthor {
                name: row.author_name,
                email: row.author_email,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedPostsResponse {
    pub posts: Vec<PostWithAuthor>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub category: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 3, max = 120, message = "Title must be between 3 and 120 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PostFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    pub category: Option<String>,
    /// Case-insensitive match against title or content.
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl PostFilterParams {
    /// Whitelisted sort column; anything unrecognized falls back to
    /// creation time.
    pub fn sort_column(&self) -> &'static str {
        match self.sort_by.as_deref() {
            Some("title") => "title",
            Some("price") => "price",
            Some("updatedAt") | Some("updated_at") => "updated_at",
            _ => "created_at",
        }
    }

    pub fn sort_direction(&self) -> &'static str {
        match self.sort_order.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        }
    }
}
