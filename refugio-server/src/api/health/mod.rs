//! Welcome and health check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | / | GET | none |
//! | /health | GET | none |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
    version: &'static str,
    status: &'static str,
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Bem-vindo ao Refugio's Lanche API",
        version: env!("CARGO_PKG_VERSION"),
        status: "Online",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
