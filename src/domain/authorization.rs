use crate::domain::auth::Claims;

/// Capability check run after a caller has been authenticated.
/// Returns false to refuse the request.
pub trait AccessPolicy: Send + Sync {
    fn allows(&self, claims: &Claims, capability: &str) -> bool;
}

/// Admits every authenticated caller. Roles and permissions plug in here.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAuthenticated;

impl AccessPolicy for AllowAuthenticated {
    fn allows(&self, claims: &Claims, capability: &str) -> bool {
        tracing::debug!(user = %claims.sub, capability, "capability check");
        true
    }
}
