use crate::application::auth::refresh::RefreshTokenRequest;
use crate::application::auth::signin::SignInRequest;
use crate::application::users::create::CreateUserRequest;
use crate::application::users::update::UpdateUserRequest;
use crate::presentation::dtos::{AuthTokenResource, UserResource};
use crate::shared::error::{ErrorResponse, JsonApiError};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warden Auth API",
        version = "0.1.0",
        description = "Account signup, signin, refresh-token rotation and logout.\n\nResponses follow the JSON:API v1.1 document shape."
    ),
    paths(
        crate::presentation::handlers::auth::signup,
        crate::presentation::handlers::auth::signin,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::users::get_account,
        crate::presentation::handlers::users::update_account,
        crate::presentation::handlers::users::delete_account,
    ),
    components(
        schemas(
            // Request DTOs (signup takes CreateUserRequest)
            CreateUserRequest,
            SignInRequest,
            RefreshTokenRequest,
            UpdateUserRequest,

            UserResource,
            AuthTokenResource,
            JsonApiResource<UserResource>,
            JsonApiResource<AuthTokenResource>,
            JsonApiResponse<JsonApiResource<UserResource>>,
            JsonApiResponse<JsonApiResource<AuthTokenResource>>,

            ErrorResponse,
            JsonApiError,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Account self-service endpoints")
    ),
    modifiers(&SecurityAddon)
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
