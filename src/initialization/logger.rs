//! Logger setup for validation runs.
//!
//! Rule progress and fetch failures are logged under the `fps_check` target.
//! HTTP stack crates are held at `warn` so a network run does not bury the
//! per-site messages in connection chatter.

use std::io::Write;

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Crates pulled in by the site fetcher that log every connection.
const NOISY_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util", "h2", "rustls"];

/// Installs the global logger for a run.
///
/// `level` applies to this crate and overrides `RUST_LOG` for it. Other
/// targets keep whatever `RUST_LOG` says, except the HTTP stack, which only
/// follows `level` when tracing.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for module in NOISY_MODULES {
        builder.filter_module(module, dependency_level(level));
    }
    builder.filter_module("fps_check", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(record.level(), record.target(), &record.args().to_string())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    level_label(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn dependency_level(level: LevelFilter) -> LevelFilter {
    if level == LevelFilter::Trace {
        LevelFilter::Trace
    } else {
        level.min(LevelFilter::Warn)
    }
}

fn level_label(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

/// One JSON object per record, timestamped in RFC 3339.
fn json_line(level: Level, target: &str, message: &str) -> String {
    json!({
        "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}
