use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::modules::users::model::roles;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{
    CreatePostRequest, PaginatedPostsResponse, Post, PostFilterParams, PostWithAuthorRow,
    UpdatePostRequest,
};

const POST_COLUMNS: &str = "id, title, content, category, image, price, is_available, \
                            author_id, created_at, updated_at";

pub struct PostService;

impl PostService {
    #[instrument(skip(db, dto), fields(post.title = %dto.title))]
    pub async fn create_post(
        db: &PgPool,
        author_id: Uuid,
        dto: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, category, image, price, author_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(dto.title.trim())
        .bind(&dto.content)
        .bind(dto.category.as_deref().unwrap_or("General"))
        .bind(&dto.image)
        .bind(dto.price.unwrap_or(0.0))
        .bind(author_id)
        .fetch_one(db)
        .await?;

        info!(post.id = %post.id, "Post created");

        Ok(post)
    }

    #[instrument(skip(db))]
    pub async fn get_post(db: &PgPool, post_id: Uuid) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND is_available = TRUE"
        ))
        .bind(post_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            debug!(post.id = %post_id, "Post not found or unavailable");
            AppError::PostNotFound
        })
    }

    #[instrument(skip(db, filters))]
    pub async fn get_posts(
        db: &PgPool,
        filters: PostFilterParams,
    ) -> Result<PaginatedPostsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let page = filters.pagination.page();

        let mut where_clause = String::from(" WHERE p.is_available = TRUE");
        let mut params: Vec<String> = Vec::new();

        if let Some(category) = &filters.category {
            params.push(category.clone());
            where_clause.push_str(&format!(" AND p.category = ${}", params.len()));
        }

        if let Some(search) = &filters.search {
            params.push(format!("%{}%", search));
            let idx = params.len();
            where_clause.push_str(&format!(
                " AND (p.title ILIKE ${idx} OR p.content ILIKE ${idx})"
            ));
        }

        let count_query = format!("SELECT COUNT(*) FROM posts p{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT p.id, p.title, p.content, p.category, p.image, p.price, p.is_available,
                    p.author_id, p.created_at, p.updated_at,
                    u.name AS author_name, u.email AS author_email
             FROM posts p
             INNER JOIN users u ON u.id = p.author_id{where_clause}
             ORDER BY p.{} {}
             LIMIT {limit} OFFSET {offset}",
            filters.sort_column(),
            filters.sort_direction(),
        );

        let mut data_sql = sqlx::query_as::<_, PostWithAuthorRow>(&data_query);
        for param in &params {
            data_sql = data_sql.bind(param);
        }
        let rows = data_sql.fetch_all(db).await?;

        debug!(total, returned = rows.len(), "Posts fetched");

        Ok(PaginatedPostsResponse {
            posts: rows.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(total, limit, page),
        })
    }

    /// Missing fields keep their stored values. Only the author (or an
    /// admin) may edit a post.
    #[instrument(skip(db, dto))]
    pub async fn update_post(
        db: &PgPool,
        post_id: Uuid,
        actor_id: Uuid,
        actor_role: &str,
        dto: UpdatePostRequest,
    ) -> Result<Post, AppError> {
        let post = Self::get_post(db, post_id).await?;
        Self::ensure_owner(&post, actor_id, actor_role)?;

        let post = sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts
             SET title = COALESCE($1, title),
                 content = COALESCE($2, content),
                 category = COALESCE($3, category),
                 image = COALESCE($4, image),
                 price = COALESCE($5, price),
                 updated_at = NOW()
             WHERE id = $6
             RETURNING {POST_COLUMNS}"
        ))
        .bind(dto.title.as_deref().map(str::trim))
        .bind(&dto.content)
        .bind(&dto.category)
        .bind(&dto.image)
        .bind(dto.price)
        .bind(post_id)
        .fetch_one(db)
        .await?;

        info!(post.id = %post.id, "Post updated");

        Ok(post)
    }

    #[instrument(skip(db))]
    pub async fn delete_post(
        db: &PgPool,
        post_id: Uuid,
        actor_id: Uuid,
        actor_role: &str,
    ) -> Result<(), AppError> {
        let post = Self::get_post(db, post_id).await?;
        Self::ensure_owner(&post, actor_id, actor_role)?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(db)
            .await?;

        info!(post.id = %post_id, "Post deleted");

        Ok(())
    }

    fn ensure_owner(post: &Post, actor_id: Uuid, actor_role: &str) -> Result<(), AppError> {
        if post.author_id == actor_id || actor_role == roles::ADMIN {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not have permission to modify this post".to_string(),
            ))
        }
    }
}
