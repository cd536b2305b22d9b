//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the site, the item catalog
//! and the browser without depending on concrete implementations.

pub mod catalog_port;
pub mod platform;
pub mod site_api_port;

pub use catalog_port::{CatalogError, CatalogPort};
pub use platform::{FileReadError, FileReaderPort, NotifierPort, PlatformFuture, SleepPort};
pub use site_api_port::{ApiError, FormPost, SiteApiPort};

#[cfg(any(test, feature = "testing"))]
pub use catalog_port::MockCatalogPort;
#[cfg(any(test, feature = "testing"))]
pub use platform::{MockFileReaderPort, MockNotifierPort, MockSleepPort};
#[cfg(any(test, feature = "testing"))]
pub use site_api_port::MockSiteApiPort;
