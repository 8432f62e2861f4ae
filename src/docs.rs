use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    LoginPendingResponse, LoginRequest, RegisterRequest, TwoFactorResponse, VerifyTwoFactorRequest,
};
use crate::modules::posts::model::{
    CreatePostRequest, PaginatedPostsResponse, Post, PostAuthor, PostWithAuthor, UpdatePostRequest,
};
use crate::modules::users::model::SanitizedUser;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::verify_two_factor,
        crate::modules::users::controller::get_profile,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::get_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginPendingResponse,
            VerifyTwoFactorRequest,
            TwoFactorResponse,
            SanitizedUser,
            Post,
            PostAuthor,
            PostWithAuthor,
            CreatePostRequest,
            UpdatePostRequest,
            PaginatedPostsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and two-factor verification"),
        (name = "Users", description = "User profile endpoints"),
        (name = "Posts", description = "Post management endpoints")
    ),
    info(
        title = "Inkpost API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL featuring email two-factor authentication and JWT sessions.",
        contact(
            name = "API Support",
            email = "support@inkpost.dev"
        ),
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
