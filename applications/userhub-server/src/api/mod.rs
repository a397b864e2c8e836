/// API route modules
pub mod health;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Build the application router.
///
/// Every request runs inside its own span (method, uri), so anything a
/// handler logs carries the request's fields.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/:id", get(users::get_user))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(app_state)
}
