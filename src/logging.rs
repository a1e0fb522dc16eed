use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use tracing::Level;

use crate::config::LoggingConfig;

pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global subscriber writing to the configured log file.
///
/// The terminal belongs to the overlay, so without a file nothing is
/// installed and events are dropped.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };

    ensure_parent_dir(path)?;
    let file = File::create(path)?;
    let make_writer = move || {
        file.try_clone()
            .expect("failed to clone log output file")
    };

    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(parse_level(&config.level))
        .with_writer(make_writer);

    #[cfg(feature = "json-logs")]
    if config.json {
        return install(builder.json().finish());
    }

    install(builder.finish())?;
    if config.json {
        tracing::warn!("json logs need the `json-logs` feature, writing plain text");
    }
    Ok(true)
}

fn install<S>(subscriber: S) -> Result<bool>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(true)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
