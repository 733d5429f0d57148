use thiserror::Error;

/// Failure reported by the hardware binding for an input line.
#[derive(Error, Debug)]
pub enum LineError {
    #[error("Line is not configured for input")]
    NotConfigured,

    #[error("Line is already configured")]
    AlreadyConfigured,

    #[error("Hardware error: {0}")]
    Hardware(String),
}

/// Startup failure while resolving or configuring the watched line.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("invalid pin name: {0:?}")]
    InvalidPin(String),

    #[error("invalid pull name: {0:?}")]
    InvalidPull(String),

    #[error("invalid edge name: {0:?}")]
    InvalidEdge(String),

    #[error("could not configure {pin} (dir=IN, pull={pull}, edge={edge}): {source}")]
    Configure {
        pin: String,
        pull: String,
        edge: String,
        #[source]
        source: LineError,
    },
}

/// Reason the edge watcher stopped producing interrupts.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Edge wait failed: {0}")]
    EdgeWait(#[from] LineError),

    #[error("Hand-off channel closed by the receiver")]
    HandoffClosed,

    #[error("Edge watcher aborted: {0}")]
    Aborted(String),
}

/// Failure of the privileged reboot action.
#[derive(Error, Debug)]
pub enum RebootError {
    #[error("Restart request refused: {0}")]
    Restart(#[source] std::io::Error),
}

/// Malformed debounce duration text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration: {0:?}")]
    Invalid(String),

    #[error("missing unit in duration: {0:?}")]
    MissingUnit(String),

    #[error("duration out of range: {0:?}")]
    Overflow(String),
}
