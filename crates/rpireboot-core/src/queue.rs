//! Line setup and wiring of the watcher to the filter.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::config::WatchConfig;
use crate::debounce::DebounceFilter;
use crate::error::{SetupError, WatchError};
use crate::interrupt::Interrupt;
use crate::line::{Edge, InputLine, LineRegistry, Pull};
use crate::reboot::RebootAction;
use crate::watcher::EdgeWatcher;

/// Capacity of the hand-off channel.
///
/// tokio channels need at least one slot; with one slot the watcher can have
/// a single interrupt in flight and blocks on the next send until the filter
/// has received it.
pub const HANDOFF_DEPTH: usize = 1;

/// A configured input line, ready to be watched.
pub struct InterruptQueue<L> {
    pin: String,
    line: L,
    debounce: Duration,
    edge_timeout: Option<Duration>,
}

impl<L: InputLine> InterruptQueue<L> {
    /// Resolve the configured line and set it up for input.
    ///
    /// Fails with a [`SetupError`] naming the offending value if the line is
    /// unknown or the hardware rejects the configuration.
    pub fn open<R>(registry: &R, config: &WatchConfig) -> Result<Self, SetupError>
    where
        R: LineRegistry<Line = L>,
    {
        let pin_name = config.pin_name();
        let line = registry
            .by_name(&pin_name)
            .ok_or_else(|| SetupError::InvalidPin(pin_name.clone()))?;

        Self::configure(
            line,
            &pin_name,
            config.pull,
            config.edge,
            config.debounce,
            config.edge_timeout,
        )
    }

    fn configure(
        mut line: L,
        pin_name: &str,
        pull: Pull,
        edge: Edge,
        debounce: Duration,
        edge_timeout: Option<Duration>,
    ) -> Result<Self, SetupError> {
        line.configure_input(pull, edge)
            .map_err(|source| SetupError::Configure {
                pin: pin_name.to_string(),
                pull: pull.to_string(),
                edge: edge.to_string(),
                source,
            })?;

        info!(pin = %pin_name, %pull, %edge, "Configured input line");

        Ok(Self {
            pin: pin_name.to_string(),
            line,
            debounce,
            edge_timeout,
        })
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Bound each edge wait instead of waiting forever.
    pub fn with_edge_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.edge_timeout = timeout;
        self
    }

    /// Split into the producer half and a fresh hand-off channel.
    pub fn into_parts(
        self,
    ) -> (
        EdgeWatcher<L>,
        mpsc::Sender<Interrupt>,
        mpsc::Receiver<Interrupt>,
    ) {
        let (tx, rx) = mpsc::channel(HANDOFF_DEPTH);
        (EdgeWatcher::new(self.line, self.pin, self.edge_timeout), tx, rx)
    }

    /// Run the watcher on a blocking thread and the filter on the current task.
    ///
    /// Under normal operation an accepted interrupt reboots the host and this
    /// never returns. It returns only once the watcher has failed and the
    /// filter has drained the remaining interrupts.
    pub async fn run<A: RebootAction>(self, reboot: A) -> WatchError {
        let debounce = self.debounce;
        let (watcher, tx, rx) = self.into_parts();
        let handle = tokio::task::spawn_blocking(move || watcher.watch(tx));

        let mut filter = DebounceFilter::new(debounce, reboot);
        filter.listen(rx).await;

        match handle.await {
            Ok(err) => err,
            Err(join_err) => {
                error!(error = %join_err, "Edge watcher task aborted");
                WatchError::Aborted(join_err.to_string())
            }
        }
    }
}
