//! Logger initialization on top of `tracing-subscriber`.
//!
//! Console output only: human-readable by default, JSON lines when
//! `logger.json` is set (the format log shippers ingest).

use std::io::IsTerminal;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::settings::LoggerConfig;

/// Initializes the global subscriber from the logger configuration.
///
/// The level string accepts full `EnvFilter` directives (e.g.
/// `info,pustaka=debug`); an unparseable value falls back to `info`.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        let use_ansi = std::io::stdout().is_terminal();
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?;
    }

    Ok(())
}
