//! Application services
//!
//! Each service owns the ports it needs behind `Arc<dyn ...>` and exposes the
//! use cases of one page component.

pub mod build_list_service;
pub mod catalog_service;
pub mod formset_service;
pub mod interaction_service;
pub mod notification_service;
pub mod suggestion_service;

pub use build_list_service::{comment_sort_url, BuildListController, BuildListFilter, BuildSort};
pub use catalog_service::CatalogService;
pub use formset_service::FormsetController;
pub use interaction_service::InteractionService;
pub use notification_service::{NotificationPoller, StopHandle};
pub use suggestion_service::{
    DropdownView, InputOutcome, Key, KeyOutcome, QueryOutcome, SuggestionEngine, SuggestionState,
};
