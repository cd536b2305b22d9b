//! Platform abstraction ports for cross-platform compatibility
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`, not here.

use std::{future::Future, pin::Pin};

use erbuilds_domain::UploadFile;

/// Boxed future returned by platform ports
///
/// Browser futures are `!Send`, so the bound is only required natively.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

#[cfg(target_arch = "wasm32")]
pub type PlatformFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

/// Async sleep abstraction (debounce timers, poll intervals)
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SleepPort: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> PlatformFuture<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileReadError {
    #[error("Could not read {name}: {message}")]
    Unreadable { name: String, message: String },
}

/// Reads a selected file into a data URL for the preview image
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait FileReaderPort: Send + Sync {
    async fn read_data_url(&self, file: &UploadFile) -> Result<String, FileReadError>;
}

/// Blocking user-facing messages (`window.alert` in the browser)
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn alert(&self, message: &str);
}
