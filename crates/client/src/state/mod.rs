//! Composition of ports and services for one page

pub mod platform;
pub mod services;

pub use platform::Platform;
pub use services::ClientServices;
