//! # rpireboot-power
//!
//! Privileged host actions fired by an accepted button press.
//!
//! ## Actions
//!
//! - [`HostReboot`]: `sync(2)` to flush every filesystem, then `reboot(2)` with
//!   `LINUX_REBOOT_CMD_RESTART`. Needs `CAP_SYS_BOOT` (usually root).
//! - [`DryRunReboot`]: logs the press and leaves the host alone, for checking
//!   wiring and debounce settings on a live system.
//!
//! ## Platform
//!
//! The restart request uses the Linux `reboot(2)` interface. This crate will
//! not compile on other platforms.

#[cfg(not(target_os = "linux"))]
compile_error!("rpireboot-power requires Linux");

mod dry_run;
mod host;

pub use dry_run::DryRunReboot;
pub use host::{restart, sync_filesystems, HostReboot};
