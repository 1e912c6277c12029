//! Route Definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/catalogue", get(catalogue_handler))
        .route("/api/accounts/:account_id", get(account_handler))
        // Stateless web front-end
        .route("/webapp", post(webapp_handler))
        // Conversational front-end
        .route("/chat/:account_id", post(chat_handler))
        .with_state(state)
}
