//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates the platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in infrastructure/platform/desktop.rs or wasm.rs
//! - Handed to `ClientServices`, which passes the ports on to each service

use std::sync::Arc;

use crate::ports::outbound::{FileReaderPort, NotifierPort, SleepPort};

/// Platform services container
#[derive(Clone)]
pub struct Platform {
    sleep: Arc<dyn SleepPort>,
    file_reader: Arc<dyn FileReaderPort>,
    notifier: Arc<dyn NotifierPort>,
}

impl Platform {
    pub fn new(
        sleep: Arc<dyn SleepPort>,
        file_reader: Arc<dyn FileReaderPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            sleep,
            file_reader,
            notifier,
        }
    }

    pub fn sleep(&self) -> Arc<dyn SleepPort> {
        Arc::clone(&self.sleep)
    }

    pub fn file_reader(&self) -> Arc<dyn FileReaderPort> {
        Arc::clone(&self.file_reader)
    }

    pub fn notifier(&self) -> Arc<dyn NotifierPort> {
        Arc::clone(&self.notifier)
    }
}
