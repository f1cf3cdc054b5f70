use crate::application::users::delete::DeleteUserUseCase;
use crate::application::users::get::GetUserUseCase;
use crate::application::users::update::{UpdateUserRequest, UpdateUserUseCase};
use crate::domain::users::User;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::UserResource;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

fn user_document(user: User) -> Json<JsonApiResponse<JsonApiResource<UserResource>>> {
    let resource = JsonApiResource::new("users", user.id.to_string(), UserResource::from(user));
    Json(JsonApiResponse::new(resource))
}

/// Get the signed-in account
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Account found", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = GetUserUseCase::new(state.user_repo)
        .execute(auth.user_id()?)
        .await?;

    Ok((StatusCode::OK, user_document(user)))
}

/// Update the signed-in account
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = JsonApiResponse<JsonApiResource<UserResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = UpdateUserUseCase::new(state.user_repo, state.password_service);
    let user = use_case.execute(auth.user_id()?, req).await?;

    Ok((StatusCode::OK, user_document(user)))
}

/// Delete the signed-in account
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "users"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    DeleteUserUseCase::new(state.user_repo)
        .execute(auth.user_id()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
