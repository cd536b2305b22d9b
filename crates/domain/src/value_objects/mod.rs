//! Value objects - Immutable objects defined by their attributes

mod catalog;
mod csrf;
mod formset_naming;
mod notification_badge;
mod reactions;
mod suggestion_query;
mod upload_file;

pub use catalog::{CatalogCategory, CatalogItem};
pub use csrf::{CsrfSource, CSRF_COOKIE_NAME, CSRF_FORM_FIELD, CSRF_HEADER};
pub use formset_naming::{
    subfields, FieldBinding, FormsetPrefix, SlotTemplate, IMAGES_PREFIX, PREFIX_PLACEHOLDER,
    TOTAL_FORMS_SUFFIX,
};
pub use notification_badge::NotificationBadge;
pub use reactions::{CommentVotes, GraceButton, VoteType};
pub use suggestion_query::{SuggestionQuery, MIN_TOKEN_CHARS};
pub use upload_file::{UploadFile, UploadRejection, MAX_UPLOAD_BYTES};
