use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sends log output to `log_file`, since the terminal belongs to the UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    if let Some(dir) = log_file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

/// Formats a duration in seconds as `12.3s` below a minute and `2m 5s` above.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{seconds:.1}s");
    }
    let total = seconds.floor() as u64;
    format!("{}m {}s", total / 60, total % 60)
}

/// Formats an epoch-millisecond timestamp in local time, e.g. `Oct 16, 02:05 PM`.
pub fn format_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || "-".to_owned(),
        |time| {
            time.with_timezone(&Local)
                .format("%b %-d, %I:%M %p")
                .to_string()
        },
    )
}
