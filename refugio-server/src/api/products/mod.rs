//! Product API Module
//!
//! Catalog reads are public; mutations require an authenticated admin.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public catalog
        .route("/", get(handler::list))
        .route("/category/{category}", get(handler::list_by_category))
        .route("/{id}", get(handler::get_by_id))
        // Admin mutations
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::remove))
}
