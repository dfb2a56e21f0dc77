//! # Overland Engine
//!
//! Headless driver for Project Overland's world streaming.
//!
//! Loads the engine config, builds the chunk window for the world seed and
//! walks a scripted tracked position through it, one tick at a time.
//!
//! Usage: `overland [config.toml]`. Without an argument `overland.toml` in
//! the working directory is used if present. `overland --init [path]` writes
//! the default config and exits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod renderer;
mod walker;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{EngineConfig, CONFIG_FILE};

/// Log directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_DIRECTIVES: &str = "overland=info,overland_world=info";

/// Builds the log filter from `RUST_LOG`-style directives.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(directives.as_deref()))
        .init();

    info!("Project Overland starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let mut config = match args.next().as_deref() {
        Some("--init") => {
            let path = args.next().unwrap_or_else(|| CONFIG_FILE.to_string());
            EngineConfig::default()
                .save_to(&path)
                .with_context(|| format!("writing default config to {path}"))?;
            return Ok(());
        },
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    config.validate();

    let stats = app::run(&config);

    info!("Project Overland shutdown complete after {} ticks", stats.ticks);
    Ok(())
}
