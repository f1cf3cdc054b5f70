use crate::domain::auth::{Claims, TokenKind};
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::header, http::request::Parts};

/// Authenticated user extractor
/// Validates the access token from the Authorization header
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.claims
            .user_id()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        // Refresh tokens are signed with a different secret and fail here
        let claims = state
            .token_service
            .verify(TokenKind::Access, token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser { claims })
    }
}
