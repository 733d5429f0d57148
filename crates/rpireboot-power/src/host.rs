//! Filesystem sync and hard restart through libc.

use rpireboot_core::{RebootAction, RebootError};
use tracing::{error, info, warn};

/// Commit all buffered filesystem writes to durable storage.
pub fn sync_filesystems() {
    // sync(2) cannot fail
    unsafe { libc::sync() };
}

/// Ask the kernel to restart the machine immediately.
///
/// Does not return on success. The returned error is the reason the kernel
/// refused, typically `EPERM` without `CAP_SYS_BOOT`.
pub fn restart() -> std::io::Error {
    unsafe {
        libc::reboot(libc::LINUX_REBOOT_CMD_RESTART);
    }

    // reboot only returns on error
    std::io::Error::last_os_error()
}

/// Syncs and restarts the host.
#[derive(Debug, Default)]
pub struct HostReboot {
    attempts: u32,
}

impl HostReboot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of restart requests made so far that came back refused.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl RebootAction for HostReboot {
    fn reboot(&mut self) -> Result<(), RebootError> {
        self.attempts += 1;
        if self.attempts > 1 {
            warn!(attempt = self.attempts, "Retrying restart after earlier refusal");
        }

        info!("Syncing filesystems");
        sync_filesystems();

        info!("Requesting host restart");
        let err = restart();
        error!(error = %err, "Host refused restart request");
        Err(RebootError::Restart(err))
    }
}
