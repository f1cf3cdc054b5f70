use crate::infrastructure::state::AppState;
use crate::presentation::handlers::users;
use crate::presentation::middleware::auth::{RequiredCapability, authorize};
use axum::{Extension, Router, middleware, routing::get};

/// Account self-service routes, guarded by the capability hook
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(users::get_account)
                .patch(users::update_account)
                .delete(users::delete_account),
        )
        .route_layer(middleware::from_fn_with_state(state, authorize))
        .route_layer(Extension(RequiredCapability("account")))
}
