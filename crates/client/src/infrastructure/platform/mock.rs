//! Deterministic platform providers for tests and headless runs

use std::sync::{Arc, Mutex};

use crate::infrastructure::DataUrlReader;
use crate::ports::outbound::{NotifierPort, PlatformFuture, SleepPort};
use crate::state::Platform;

/// Sleep that completes immediately and remembers what was requested
#[derive(Clone, Default)]
pub struct ImmediateSleep {
    requested: Arc<Mutex<Vec<u64>>>,
}

impl ImmediateSleep {
    pub fn requested(&self) -> Vec<u64> {
        self.requested
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl SleepPort for ImmediateSleep {
    fn sleep_ms(&self, ms: u64) -> PlatformFuture<()> {
        self.requested
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(ms);
        Box::pin(std::future::ready(()))
    }
}

/// Notifier that records alerts instead of showing them
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl NotifierPort for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}

/// A platform whose timers fire at once and whose alerts are recorded.
pub fn create_mock_platform() -> (Platform, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let platform = Platform::new(
        Arc::new(ImmediateSleep::default()),
        Arc::new(DataUrlReader),
        Arc::new(notifier.clone()),
    );
    (platform, notifier)
}
