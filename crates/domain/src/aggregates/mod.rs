//! Aggregates - Consistency boundaries mutated through a single root

mod image_formset;

pub use image_formset::{FileIntake, ImageFormset, PreviewRequest, MAX_IMAGE_SLOTS};
