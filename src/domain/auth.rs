use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Which of the two signing secrets a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Unique token id, keeps two pairs minted in the same second distinct
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: TokenKind,
}

impl Claims {
    pub fn new(
        kind: TokenKind,
        user_id: i64,
        username: &str,
        expiry_seconds: i64,
    ) -> Result<Self> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let exp = now
            .checked_add(expiry_seconds)
            .ok_or_else(|| anyhow::anyhow!("Token lifetime out of range: {}", expiry_seconds))?;

        Ok(Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp,
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
        })
    }

    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("Invalid user ID in claims: {}", e))
    }
}

/// Freshly minted access/refresh pair. Only a hash of `refresh_token` is ever stored.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies tokens; each kind has its own secret and lifetime
pub trait TokenService: Send + Sync {
    fn sign(&self, kind: TokenKind, user_id: i64, username: &str) -> Result<String>;

    /// Checks signature, expiry and that the token really is of `kind`
    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims>;
}
