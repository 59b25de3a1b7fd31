//! Refugio's Lanche - online ordering backend
//!
//! # Architecture overview
//!
//! - **Catalog** (`db`): product CRUD over embedded SurrealDB
//! - **Order lifecycle** (`orders`): pricing, number allocation, status
//!   state machine, cancellation, sales aggregation
//! - **Authentication** (`auth`): JWT + Argon2 admin accounts
//! - **HTTP API** (`api`): RESTful interface for the storefront and the
//!   admin panel
//!
//! # Module structure
//!
//! ```text
//! refugio-server/src/
//! ├── core/          # configuration, state, server bootstrap
//! ├── auth/          # JWT service and extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database service, models, repositories
//! ├── orders/        # order lifecycle and sales aggregation
//! └── utils/         # logger, result alias, env setup
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use utils::{ApiError, ApiResponse, AppResult, setup_environment};

pub fn print_banner() {
    println!(
        r#"
    ____       ____            _
   / __ \___  / __/_  ______ _(_)___
  / /_/ / _ \/ /_/ / / / __ `/ / __ \
 / _, _/  __/ __/ /_/ / /_/ / / /_/ /
/_/ |_|\___/_/  \__,_/\__, /_/\____/
    __                /____/
   / /   ____ _____  _____/ /_  ___
  / /   / __ `/ __ \/ ___/ __ \/ _ \
 / /___/ /_/ / / / / /__/ / / /  __/
/_____/\__,_/_/ /_/\___/_/ /_/\___/
    "#
    );
}
