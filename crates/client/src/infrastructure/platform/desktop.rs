//! Desktop platform implementations
//!
//! Timers come from tokio; alerts have no dialog to show in, so they go to
//! stderr and the log.

use std::sync::Arc;

use crate::infrastructure::DataUrlReader;
use crate::ports::outbound::{NotifierPort, PlatformFuture, SleepPort};
use crate::state::Platform;

/// Desktop sleep provider using tokio timers
#[derive(Clone, Default)]
pub struct DesktopSleep;

impl SleepPort for DesktopSleep {
    fn sleep_ms(&self, ms: u64) -> PlatformFuture<()> {
        Box::pin(tokio::time::sleep(std::time::Duration::from_millis(ms)))
    }
}

/// Desktop alert sink
#[derive(Clone, Default)]
pub struct DesktopNotifier;

impl NotifierPort for DesktopNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = %message, "User alert");
        eprintln!("{}", message);
    }
}

/// Create a Platform instance wired with the desktop providers
pub fn create_platform() -> Platform {
    Platform::new(
        Arc::new(DesktopSleep),
        Arc::new(DataUrlReader),
        Arc::new(DesktopNotifier),
    )
}
