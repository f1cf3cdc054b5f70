use anyhow::Result;

/// One-way hashing used for account passwords and for refresh tokens at rest
pub trait PasswordHashingService: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Returns false on mismatch and on a stored hash that cannot be parsed
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}
