use rpireboot_core::{RebootAction, RebootError};
use tracing::warn;

/// Stand-in for [`HostReboot`](crate::HostReboot) that only logs.
#[derive(Debug, Default)]
pub struct DryRunReboot {
    presses: u64,
}

impl DryRunReboot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted presses seen so far.
    pub fn presses(&self) -> u64 {
        self.presses
    }
}

impl RebootAction for DryRunReboot {
    fn reboot(&mut self) -> Result<(), RebootError> {
        self.presses += 1;
        warn!(presses = self.presses, "Dry run: skipping sync and restart");
        Ok(())
    }
}
