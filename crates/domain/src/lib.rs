//! Domain model for the ER Builds front end
//!
//! Pure types and invariants: the image formset, catalog search, reaction
//! state and the naming rules the server expects. No I/O and no async.

pub mod aggregates;
pub mod catalog_search;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{FileIntake, ImageFormset, PreviewRequest, MAX_IMAGE_SLOTS};
pub use catalog_search::{rank, SuggestionRow, MAX_SUGGESTIONS, PLACEHOLDER_GLYPH};
pub use entities::{ImageSlot, PersistedImage};
pub use error::DomainError;
pub use ids::{BuildId, CommentId, SlotId};
pub use value_objects::{
    subfields, CatalogCategory, CatalogItem, CommentVotes, CsrfSource, FieldBinding,
    FormsetPrefix, GraceButton, NotificationBadge, SlotTemplate, SuggestionQuery, UploadFile,
    UploadRejection, VoteType, MAX_UPLOAD_BYTES, MIN_TOKEN_CHARS,
};
