//! Domain entities - Objects with identity

mod image_slot;

pub use image_slot::{ImageSlot, PersistedImage};
