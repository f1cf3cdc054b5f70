use crate::application::auth::logout::LogoutUseCase;
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use crate::application::auth::signin::{SignInRequest, SignInUseCase};
use crate::application::auth::signup::{SignUpRequest, SignUpUseCase};
use crate::application::auth::token_utils::TokenResponse;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::AuthTokenResource;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiResource, JsonApiResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

type TokenDocument = Json<JsonApiResponse<JsonApiResource<AuthTokenResource>>>;

fn token_document(response: TokenResponse) -> TokenDocument {
    let resource =
        JsonApiResource::new("auth-tokens", "session", AuthTokenResource::from(response));
    Json(JsonApiResponse::new(resource))
}

/// Register a new account and start a session
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 422, description = "Validation error or username/email taken", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SignUpUseCase::new(
        state.user_repo,
        state.token_service,
        state.password_service,
        state.access_token_expiry,
    );

    let response = use_case.execute(req).await?;

    Ok((StatusCode::CREATED, token_document(response)))
}

/// Sign in with username and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Password is incorrect", body = ErrorResponse),
        (status = 404, description = "User does not exist", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = SignInUseCase::new(
        state.user_repo,
        state.token_service,
        state.password_service,
        state.access_token_expiry,
    );

    let response = use_case.execute(req).await?;

    Ok((StatusCode::OK, token_document(response)))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = JsonApiResponse<JsonApiResource<AuthTokenResource>>),
        (status = 401, description = "Invalid, revoked or superseded refresh token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RefreshTokenUseCase::new(
        state.user_repo,
        state.token_service,
        state.password_service,
        state.access_token_expiry,
    );

    let response = use_case.execute(req).await?;

    Ok((StatusCode::OK, token_document(response)))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = auth.user_id()?;

    LogoutUseCase::new(state.user_repo).execute(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
