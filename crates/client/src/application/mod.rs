//! Application layer - Use cases and orchestration

pub mod debounce;
pub mod error;
pub mod services;

// Re-export common types
pub use debounce::{Debouncer, Ticket};
pub use error::InteractionError;
