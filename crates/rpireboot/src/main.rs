//! rpireboot - restart the host when a GPIO button is pressed.
//!
//! Watches one input line for edges, drops bounces that arrive within the
//! debounce window of the last accepted press, and on an accepted press syncs
//! all filesystems and restarts the machine.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rpireboot_core::{
    parse_duration, InterruptQueue, WatchConfig, DEFAULT_EDGE, DEFAULT_PIN, DEFAULT_PULL,
};
use rpireboot_power::{DryRunReboot, HostReboot};
use tracing::{info, warn};

mod changelog;
mod gpio;
mod telemetry;

use gpio::RppalGpio;

/// Reboot the host when a GPIO button is pressed
#[derive(Parser, Debug)]
#[command(name = "rpireboot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen for interrupts on GPIO pin `n`
    #[arg(short = 'p', value_name = "n", default_value_t = DEFAULT_PIN, env = "RPIREBOOT_PIN")]
    pin: u8,

    /// Configure pull on interrupt pin
    #[arg(
        short = 'l',
        value_name = "up|down|float",
        default_value = DEFAULT_PULL,
        env = "RPIREBOOT_PULL"
    )]
    pull: String,

    /// Trigger interrupt on detected edge
    #[arg(
        short = 'e',
        value_name = "rise|fall|both",
        default_value = DEFAULT_EDGE,
        env = "RPIREBOOT_EDGE"
    )]
    edge: String,

    /// Debounce reads with `duration` (e.g. 5ms, 1.5s)
    #[arg(
        short = 'd',
        value_name = "duration",
        default_value = "5ms",
        value_parser = parse_duration,
        env = "RPIREBOOT_DEBOUNCE"
    )]
    debounce: Duration,

    /// Bound each edge wait instead of blocking forever
    #[arg(long, value_name = "duration", value_parser = parse_duration)]
    edge_timeout: Option<Duration>,

    /// Log accepted presses without syncing or restarting
    #[arg(long, env = "RPIREBOOT_DRY_RUN")]
    dry_run: bool,

    /// Display change history
    #[arg(long)]
    changelog: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.changelog {
        changelog::print();
        return Ok(());
    }

    telemetry::init().map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    info!("rpireboot starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = WatchConfig::from_names(cli.pin, &cli.pull, &cli.edge, cli.debounce)
        .context("failed to initialize GPIO interrupt")?;
    config.edge_timeout = cli.edge_timeout;
    config.log_config();

    let gpio = RppalGpio::new().context("failed to open GPIO peripheral")?;
    let queue =
        InterruptQueue::open(&gpio, &config).context("failed to initialize GPIO interrupt")?;

    let err = if cli.dry_run {
        warn!("Dry run: accepted presses will not restart the host");
        queue.run(DryRunReboot::new()).await
    } else {
        queue.run(HostReboot::new()).await
    };

    Err(anyhow::Error::new(err).context(format!("stopped watching {}", config.pin_name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rpireboot"]).unwrap();

        assert_eq!(cli.pin, 18);
        assert_eq!(cli.pull, "up");
        assert_eq!(cli.edge, "fall");
        assert_eq!(cli.debounce, Duration::from_millis(5));
        assert_eq!(cli.edge_timeout, None);
        assert!(!cli.dry_run);
        assert!(!cli.changelog);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "rpireboot", "-p", "4", "-l", "down", "-e", "both", "-d", "20ms", "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.pin, 4);
        assert_eq!(cli.pull, "down");
        assert_eq!(cli.edge, "both");
        assert_eq!(cli.debounce, Duration::from_millis(20));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_bad_duration() {
        assert!(Cli::try_parse_from(["rpireboot", "-d", "5"]).is_err());
        assert!(Cli::try_parse_from(["rpireboot", "-p", "256"]).is_err());
    }
}
