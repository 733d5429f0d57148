//! Producer half of the pipeline: turns blocking edge waits into interrupts.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::error::WatchError;
use crate::interrupt::Interrupt;
use crate::line::InputLine;

/// Owns the configured input line and feeds the hand-off channel.
pub struct EdgeWatcher<L> {
    line: L,
    pin: String,
    timeout: Option<Duration>,
}

impl<L: InputLine> EdgeWatcher<L> {
    pub fn new(line: L, pin: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            line,
            pin: pin.into(),
            timeout,
        }
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Wait for edges and send one [`Interrupt`] per edge, forever.
    ///
    /// Must run on a thread that may block (`spawn_blocking` or a plain
    /// thread): both the edge wait and the send block. Each send completes
    /// before the next wait begins.
    ///
    /// Only returns on failure. The sender is dropped on return, so the
    /// receiving filter sees the end of the stream.
    pub fn watch(mut self, tx: mpsc::Sender<Interrupt>) -> WatchError {
        debug!(pin = %self.pin, timeout = ?self.timeout, "Edge watcher started");

        loop {
            match self.line.wait_for_edge(self.timeout) {
                Ok(true) => {}
                Ok(false) => {
                    trace!(pin = %self.pin, "Edge wait timed out");
                    if tx.is_closed() {
                        return self.stopped(WatchError::HandoffClosed);
                    }
                    continue;
                }
                Err(e) => return self.stopped(WatchError::EdgeWait(e)),
            }

            let level = match self.line.read() {
                Ok(level) => level,
                Err(e) => return self.stopped(WatchError::EdgeWait(e)),
            };
            let interrupt = Interrupt::now(level);
            trace!(pin = %self.pin, %level, "Edge detected");

            if tx.blocking_send(interrupt).is_err() {
                return self.stopped(WatchError::HandoffClosed);
            }
        }
    }

    fn stopped(&self, err: WatchError) -> WatchError {
        error!(pin = %self.pin, error = %err, "Edge watcher stopped");
        err
    }
}
