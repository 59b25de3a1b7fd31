//! Order API Module
//!
//! Checkout, tracking and cancellation are public; listing, status
//! transitions and sales statistics are admin-only.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public checkout and tracking
        .route("/", post(handler::create))
        .route("/number/{order_number}", get(handler::get_by_number))
        .route("/{id}/cancel", put(handler::cancel))
        // Admin lifecycle and reporting
        .route("/", get(handler::list))
        .route("/{id}/status", put(handler::update_status))
        .route("/stats/sales", get(handler::sales_stats))
}
