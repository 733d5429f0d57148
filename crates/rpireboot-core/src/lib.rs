//! # rpireboot-core
//!
//! Edge capture and debounce pipeline behind `rpireboot`.
//!
//! ## Overview
//!
//! The pipeline has two halves joined by a single hand-off channel:
//! 1. [`EdgeWatcher`] blocks on the configured input line, and for every edge
//!    it reads the level, stamps the time and sends an [`Interrupt`]
//! 2. [`DebounceFilter`] receives interrupts in order and accepts one only if
//!    more than the debounce window has passed since the last accepted one
//! 3. Every accepted interrupt invokes the injected [`RebootAction`]
//!
//! Hardware access goes through the [`LineRegistry`] and [`InputLine`] traits,
//! so the whole pipeline runs against fakes in tests.

mod config;
mod debounce;
mod error;
mod interrupt;
mod line;
mod queue;
mod reboot;
mod watcher;

pub use config::{
    parse_duration, WatchConfig, DEFAULT_DEBOUNCE, DEFAULT_EDGE, DEFAULT_PIN, DEFAULT_PULL,
};
pub use debounce::{DebounceFilter, DebounceState, ListenOutcome, Verdict};
pub use error::{DurationError, LineError, RebootError, SetupError, WatchError};
pub use interrupt::{Interrupt, Level};
pub use line::{pin_name, Edge, InputLine, LineRegistry, Pull};
pub use queue::{InterruptQueue, HANDOFF_DEPTH};
pub use reboot::RebootAction;
pub use watcher::EdgeWatcher;
