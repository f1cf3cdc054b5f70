use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use axum::{Router, routing::post};

/// Auth routes - signup, signin, token rotation and logout
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/refresh", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
}
