//! Utilities: result alias, logger and environment bootstrap

pub mod logger;

pub use shared::error::ApiError;
pub use shared::response::ApiResponse;

/// Application-level Result type
///
/// Used in HTTP handlers and application logic
pub type AppResult<T> = Result<T, ApiError>;

/// Load .env, then initialize logging from the environment
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
    let log_dir = std::env::var("LOG_DIR").ok();

    logger::init_logger(&level, environment == "production", log_dir.as_deref())
}
