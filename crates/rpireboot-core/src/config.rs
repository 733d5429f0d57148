//! Watch configuration and debounce duration parsing.
//!
//! The configuration is assembled once at startup (from command-line flags or
//! their `RPIREBOOT_*` environment fallbacks) and is read-only afterwards.
//!
//! # Defaults
//!
//! - pin: `18` (line `GPIO18`)
//! - pull: `up`
//! - edge: `fall`
//! - debounce: `5ms`

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::info;

use crate::error::{DurationError, SetupError};
use crate::line::{pin_name, Edge, Pull};

pub const DEFAULT_PIN: u8 = 18;
pub const DEFAULT_PULL: &str = "up";
pub const DEFAULT_EDGE: &str = "fall";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(5);

/// Effective configuration of the watched line and the debounce window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Line number, resolved as `GPIO<pin>`
    pub pin: u8,
    /// Pull resistor mode
    pub pull: Pull,
    /// Edge trigger mode
    pub edge: Edge,
    /// Minimum gap between accepted interrupts
    pub debounce: Duration,
    /// Bound on a single edge wait, `None` waits forever
    pub edge_timeout: Option<Duration>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_PIN,
            pull: Pull::default(),
            edge: Edge::default(),
            debounce: DEFAULT_DEBOUNCE,
            edge_timeout: None,
        }
    }
}

impl WatchConfig {
    /// Build a configuration from raw pull and edge names.
    ///
    /// Fails with the offending name if either does not parse.
    pub fn from_names(
        pin: u8,
        pull_name: &str,
        edge_name: &str,
        debounce: Duration,
    ) -> Result<Self, SetupError> {
        let pull =
            Pull::parse(pull_name).ok_or_else(|| SetupError::InvalidPull(pull_name.to_string()))?;
        let edge =
            Edge::parse(edge_name).ok_or_else(|| SetupError::InvalidEdge(edge_name.to_string()))?;

        Ok(Self {
            pin,
            pull,
            edge,
            debounce,
            edge_timeout: None,
        })
    }

    /// Name of the watched line.
    pub fn pin_name(&self) -> String {
        pin_name(self.pin)
    }

    /// Log the effective configuration.
    pub fn log_config(&self) {
        info!("Watching line {}", self.pin_name());
        info!("Pull: {}", self.pull);
        info!("Edge: {}", self.edge);
        info!("Debounce window: {:?}", self.debounce);
        match self.edge_timeout {
            Some(timeout) => info!("Edge wait timeout: {:?}", timeout),
            None => info!("Edge wait timeout: unbounded"),
        }
    }
}

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h))+$")
        .expect("duration pattern is valid")
});

static DURATION_PART_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|μs|ms|s|m|h)").expect("duration part pattern is valid")
});

/// Parse a duration such as `5ms`, `1.5s` or `1m30s`.
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. Several
/// groups may be concatenated. A bare `0` is the only value allowed without a
/// unit.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let text = s.trim();
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(DurationError::Invalid(s.to_string()));
    }
    if !DURATION_RE.is_match(text) {
        if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(DurationError::MissingUnit(s.to_string()));
        }
        return Err(DurationError::Invalid(s.to_string()));
    }

    let mut nanos = 0f64;
    for part in DURATION_PART_RE.captures_iter(text) {
        let value: f64 = part[1]
            .parse()
            .map_err(|_| DurationError::Invalid(s.to_string()))?;
        let scale = match &part[2] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(DurationError::Invalid(s.to_string())),
        };
        nanos += value * scale;
    }

    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(DurationError::Overflow(s.to_string()));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatchConfig::default();
        assert_eq!(config.pin, 18);
        assert_eq!(config.pin_name(), "GPIO18");
        assert_eq!(config.pull, Pull::Up);
        assert_eq!(config.edge, Edge::Falling);
        assert_eq!(config.debounce, Duration::from_millis(5));
        assert_eq!(config.edge_timeout, None);
    }

    #[test]
    fn test_from_names() {
        let config = WatchConfig::from_names(4, "down", "BOTH", Duration::from_millis(20)).unwrap();
        assert_eq!(config.pin_name(), "GPIO4");
        assert_eq!(config.pull, Pull::Down);
        assert_eq!(config.edge, Edge::Both);
        assert_eq!(config.debounce, Duration::from_millis(20));

        let err = WatchConfig::from_names(4, "sideways", "fall", DEFAULT_DEBOUNCE).unwrap_err();
        assert_eq!(err.to_string(), "invalid pull name: \"sideways\"");
    }

    #[test]
    fn test_default_names_parse() {
        assert_eq!(Pull::parse(DEFAULT_PULL), Some(Pull::default()));
        assert_eq!(Edge::parse(DEFAULT_EDGE), Some(Edge::default()));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("5ms"), Ok(Duration::from_millis(5)));
        assert_eq!(parse_duration("250us"), Ok(Duration::from_micros(250)));
        assert_eq!(parse_duration("250µs"), Ok(Duration::from_micros(250)));
        assert_eq!(parse_duration("10ns"), Ok(Duration::from_nanos(10)));
        assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_parse_duration_compound_and_fractional() {
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration(".5ms"), Ok(Duration::from_micros(500)));
        assert_eq!(parse_duration(" 20ms "), Ok(Duration::from_millis(20)));
    }

    #[test]
    fn test_parse_duration_errors() {
        assert_eq!(
            parse_duration("5"),
            Err(DurationError::MissingUnit("5".to_string()))
        );
        assert_eq!(
            parse_duration(""),
            Err(DurationError::Invalid(String::new()))
        );
        assert_eq!(
            parse_duration("-5ms"),
            Err(DurationError::Invalid("-5ms".to_string()))
        );
        assert_eq!(
            parse_duration("5 parsecs"),
            Err(DurationError::Invalid("5 parsecs".to_string()))
        );
        assert!(matches!(
            parse_duration("99999999999999h"),
            Err(DurationError::Overflow(_))
        ));
    }
}
