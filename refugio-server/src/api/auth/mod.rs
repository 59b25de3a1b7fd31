//! Auth API Module
//!
//! Login is public; everything else requires a valid bearer token, and
//! registration additionally requires the super-admin role.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
        .route("/update-password", put(handler::update_password))
        .route("/register", post(handler::register))
}
