//! ER Builds Client
//!
//! Browser-side behaviour of the build pages: the image formset on the build
//! form, catalog-backed suggestions for the equipment fields, grace and comment
//! votes, the unread notification badge and the build list filters.
//!
//! ## Layout
//!
//! - `ports` - traits for everything that leaves the process (site API, catalog, timers, alerts)
//! - `infrastructure` - HTTP and platform adapters for desktop and wasm
//! - `application` - services implementing each page component
//! - `state` - composition of ports and services
//! - `config` - environment-driven settings

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;

pub use application::services::{
    BuildListController, CatalogService, FormsetController, InteractionService,
    NotificationPoller, SuggestionEngine,
};
pub use config::ClientConfig;
pub use state::{ClientServices, Platform};
