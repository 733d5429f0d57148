//! Input line capabilities and the pull/edge modes used to configure them.
//!
//! The pipeline never talks to GPIO hardware directly. The binary provides a
//! [`LineRegistry`] that resolves line names to [`InputLine`] handles, and
//! tests provide scripted fakes.

use std::fmt;
use std::time::Duration;

use crate::error::LineError;
use crate::interrupt::Level;

/// Pull resistor configuration of an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pull {
    #[default]
    Up,
    Down,
    Float,
}

impl Pull {
    const NAMES: &'static [(&'static str, Pull)] = &[
        ("pullup", Pull::Up),
        ("up", Pull::Up),
        ("pulldown", Pull::Down),
        ("down", Pull::Down),
        ("float", Pull::Float),
        ("none", Pull::Float),
    ];

    /// Parse a pull mode by case-insensitive prefix.
    ///
    /// - "pullup", "up" -> Up
    /// - "pulldown", "down" -> Down
    /// - "float", "none" -> Float
    ///
    /// Returns `None` for empty input or input that prefixes none of the names.
    pub fn parse(s: &str) -> Option<Self> {
        match_prefix(s, Self::NAMES)
    }
}

impl fmt::Display for Pull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pull::Up => write!(f, "up"),
            Pull::Down => write!(f, "down"),
            Pull::Float => write!(f, "float"),
        }
    }
}

/// Which signal transitions wake the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    Rising,
    #[default]
    Falling,
    Both,
}

impl Edge {
    const NAMES: &'static [(&'static str, Edge)] = &[
        ("rise", Edge::Rising),
        ("rising", Edge::Rising),
        ("fall", Edge::Falling),
        ("falling", Edge::Falling),
        ("both", Edge::Both),
    ];

    /// Parse an edge mode by case-insensitive prefix.
    ///
    /// - "rise", "rising" -> Rising
    /// - "fall", "falling" -> Falling
    /// - "both" -> Both
    ///
    /// Returns `None` for empty input or input that prefixes none of the names.
    pub fn parse(s: &str) -> Option<Self> {
        match_prefix(s, Self::NAMES)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Rising => write!(f, "rising"),
            Edge::Falling => write!(f, "falling"),
            Edge::Both => write!(f, "both"),
        }
    }
}

fn match_prefix<T: Copy>(s: &str, names: &[(&str, T)]) -> Option<T> {
    let wanted = s.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    names
        .iter()
        .find(|(name, _)| name.starts_with(&wanted))
        .map(|(_, value)| *value)
}

/// Canonical name of a numbered line, as understood by [`LineRegistry::by_name`].
pub fn pin_name(pin: u8) -> String {
    format!("GPIO{}", pin)
}

/// Resolves line identifiers to hardware handles.
pub trait LineRegistry {
    type Line: InputLine;

    /// Look up a line by name, `None` if the name is unknown.
    fn by_name(&self, name: &str) -> Option<Self::Line>;
}

/// A single digital input line.
///
/// After [`configure_input`](InputLine::configure_input) succeeds the handle is
/// owned by the edge watcher alone.
pub trait InputLine: Send + 'static {
    /// Configure the line as an input with the given pull and edge trigger.
    fn configure_input(&mut self, pull: Pull, edge: Edge) -> Result<(), LineError>;

    /// Block until the configured edge fires.
    ///
    /// `None` waits without bound. Returns `Ok(false)` if the timeout elapsed
    /// without an edge.
    fn wait_for_edge(&mut self, timeout: Option<Duration>) -> Result<bool, LineError>;

    /// Read the current logical level.
    fn read(&self) -> Result<Level, LineError>;
}
