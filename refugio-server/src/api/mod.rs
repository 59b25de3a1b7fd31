//! API routing
//!
//! # Structure
//!
//! - [`health`] - welcome and health check
//! - [`auth`] - admin authentication
//! - [`products`] - catalog management
//! - [`orders`] - checkout, lifecycle and sales statistics

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
