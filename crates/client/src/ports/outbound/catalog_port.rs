//! Catalog Port - Paged access to the external item catalog

use erbuilds_domain::{CatalogCategory, CatalogItem};

/// Errors from a single catalog page request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    #[error("Catalog returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Catalog response could not be parsed: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait CatalogPort: Send + Sync {
    /// Fetch one page of `category`, pages counted from 0.
    async fn fetch_page(
        &self,
        category: CatalogCategory,
        page: usize,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, CatalogError>;
}
