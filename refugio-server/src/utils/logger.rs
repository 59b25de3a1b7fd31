//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - console output (pretty in development, JSON in production)
//! - daily rotating application logs, deleted after 14 days

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Days an application log file is kept before cleanup
const LOG_RETENTION_DAYS: i64 = 14;

/// Clean up application log files older than the retention window
///
/// Call periodically (e.g. daily) to bound log size.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    use chrono::{Local, TimeZone};

    let cutoff = Local::now() - chrono::Duration::days(LOG_RETENTION_DAYS);

    if !log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            // Match app.YYYY-MM-DD pattern produced by the daily appender
            if let Some(date_part) = name.strip_prefix("app.")
                && let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                && let Some(file_day) = Local
                    .from_local_datetime(&naive_date.and_hms_opt(0, 0, 0).unwrap_or_default())
                    .earliest()
                && file_day < cutoff
            {
                fs::remove_file(&path)?;
                tracing::info!(file = %name, "Deleted old log file");
            }
        }
    }

    Ok(())
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - default log level when RUST_LOG is unset (e.g. "info")
/// * `json_format` - JSON output (production) or pretty output (development)
/// * `log_dir` - optional directory for the daily rotating app log
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            cleanup_old_logs(dir)?;

            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "app");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
