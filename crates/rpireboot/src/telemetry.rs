//! Logging setup for the `rpireboot` binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,rpireboot=debug,rpireboot_core=debug,rpireboot_power=debug";

/// Install the global `tracing` subscriber.
///
/// Console output only; nothing about presses is persisted.
///
/// # Configuration
///
/// - `RUST_LOG`: Log filter (default: info, debug for the rpireboot crates)
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("Logging initialized");

    Ok(())
}
