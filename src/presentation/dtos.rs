use crate::application::auth::token_utils::TokenResponse;
use crate::domain::users::User;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Public view of an account. Password and refresh-token hashes never leave the store.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResource {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice Liddell")]
    pub name: Option<String>,
    #[serde(serialize_with = "time::serde::rfc3339::serialize")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "time::serde::rfc3339::serialize")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthTokenResource {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    #[schema(example = 900)]
    pub expires_in: i64,
}

impl From<TokenResponse> for AuthTokenResource {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
        }
    }
}
