//! ER Builds Shared - Wire contracts between the browser client and its servers
//!
//! This crate contains the types both sides of an HTTP exchange agree on:
//! - JSON bodies of the site's AJAX endpoints and the catalog API
//! - Endpoint paths and query-string names
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **WASM compatible** - Must compile for both native and wasm32 targets

pub mod dto;
pub mod routes;

pub use dto::{
    CatalogItemDto, CatalogPageResponse, ErrorResponse, LikeAction, LikeResponse,
    UnreadCountResponse, VoteAction, VoteResponse,
};
pub use routes::{
    catalog_page_url, like_path, vote_path, AJAX_HEADER, CATALOG_MAX_ITEMS, CATALOG_PAGE_SIZE,
    DEFAULT_CATALOG_BASE_URL, UNREAD_NOTIFICATION_COUNT_PATH,
};
