//! WASM platform implementations
//!
//! Provides platform-specific implementations for the browser using
//! web-sys and gloo-timers.

use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use send_wrapper::SendWrapper;

use crate::infrastructure::DataUrlReader;
use crate::ports::outbound::{NotifierPort, PlatformFuture, SleepPort};
use crate::state::Platform;

/// WASM sleep provider using gloo-timers
#[derive(Clone, Default)]
pub struct WasmSleep;

impl SleepPort for WasmSleep {
    fn sleep_ms(&self, ms: u64) -> PlatformFuture<()> {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Box::pin(TimeoutFuture::new(ms))
    }
}

/// `window.alert` backed notifier
///
/// The window handle is `!Send`; the wrapper keeps it on the UI thread.
#[derive(Clone)]
pub struct WasmNotifier {
    window: SendWrapper<Option<web_sys::Window>>,
}

impl Default for WasmNotifier {
    fn default() -> Self {
        Self {
            window: SendWrapper::new(web_sys::window()),
        }
    }
}

impl NotifierPort for WasmNotifier {
    fn alert(&self, message: &str) {
        match &*self.window {
            Some(window) => {
                if let Err(e) = window.alert_with_message(message) {
                    tracing::error!("window.alert failed: {:?}", e);
                }
            }
            None => tracing::warn!(alert = %message, "No window to alert in"),
        }
    }
}

/// Create a Platform instance wired with the browser providers
pub fn create_platform() -> Platform {
    Platform::new(
        Arc::new(WasmSleep),
        Arc::new(DataUrlReader),
        Arc::new(WasmNotifier::default()),
    )
}
