use crate::domain::auth::{Claims, TokenKind, TokenService};
use crate::infrastructure::config::AuthConfig;
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

struct SigningKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: i64,
}

impl SigningKeys {
    fn from_secret(secret: &str, expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry,
        }
    }
}

/// JWT service using HS256 with separate access and refresh secrets
pub struct JwtTokenService {
    access: SigningKeys,
    refresh: SigningKeys,
}

impl JwtTokenService {
    /// `AuthConfig` is validated on construction, so building the service cannot fail
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: SigningKeys::from_secret(&config.access_secret, config.access_token_expiry),
            refresh: SigningKeys::from_secret(&config.refresh_secret, config.refresh_token_expiry),
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

impl TokenService for JwtTokenService {
    fn sign(&self, kind: TokenKind, user_id: i64, username: &str) -> Result<String> {
        let keys = self.keys(kind);
        let claims = Claims::new(kind, user_id, username, keys.expiry)?;
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &keys.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", kind, e))
    }

    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys(kind).decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        if token_data.claims.token_type != kind {
            anyhow::bail!("Expected {} token", kind);
        }

        Ok(token_data.claims)
    }
}
