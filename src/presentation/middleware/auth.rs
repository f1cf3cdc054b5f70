use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use axum::{
    Extension,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Capability a route group requires, attached with `route_layer(Extension(..))`
#[derive(Clone, Copy, Debug)]
pub struct RequiredCapability(pub &'static str);

pub async fn authorize(
    State(state): State<AppState>,
    Extension(RequiredCapability(capability)): Extension<RequiredCapability>,
    auth_user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.access_policy.allows(&auth_user.claims, capability) {
        tracing::warn!(user = %auth_user.claims.sub, capability, "access denied");
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }

    Ok(next.run(request).await)
}
