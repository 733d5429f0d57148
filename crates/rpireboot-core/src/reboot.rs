//! The privileged action fired by an accepted interrupt.

use crate::error::RebootError;

/// Flushes durable storage and asks the host to restart.
///
/// A host restart that succeeds never returns. `Ok(())` is only seen from
/// actions that leave the process running (dry runs, tests); `Err` means the
/// request was refused and the caller is still alive.
pub trait RebootAction: Send {
    fn reboot(&mut self) -> Result<(), RebootError>;
}

