//! Catalog Service - Fetches whole catalog categories and caches them
//!
//! The catalog API only offers paging, so a category is read page by page
//! until a short page or the item cap is reached. Results live for the
//! lifetime of the service; one instance can back every suggestion field on a
//! page.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use erbuilds_domain::{CatalogCategory, CatalogItem};
use erbuilds_shared::{CATALOG_MAX_ITEMS, CATALOG_PAGE_SIZE};

use crate::ports::outbound::CatalogPort;

pub struct CatalogService {
    port: Arc<dyn CatalogPort>,
    cache: RwLock<HashMap<CatalogCategory, Arc<Vec<CatalogItem>>>>,
    page_size: usize,
    max_items: usize,
}

impl CatalogService {
    pub fn new(port: Arc<dyn CatalogPort>) -> Self {
        Self::with_limits(port, CATALOG_PAGE_SIZE, CATALOG_MAX_ITEMS)
    }

    pub fn with_limits(port: Arc<dyn CatalogPort>, page_size: usize, max_items: usize) -> Self {
        Self {
            port,
            cache: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
            max_items,
        }
    }

    pub fn cached(&self, category: CatalogCategory) -> Option<Arc<Vec<CatalogItem>>> {
        self.cache
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(&category)
            .cloned()
    }

    /// All items of `category`, from cache when possible.
    ///
    /// Never fails: a failed first page yields an empty list that is not
    /// cached, and a failed later page keeps what was read so far.
    pub async fn fetch_catalog(&self, category: CatalogCategory) -> Arc<Vec<CatalogItem>> {
        if let Some(items) = self.cached(category) {
            tracing::debug!(%category, count = items.len(), "Catalog cache hit");
            return items;
        }

        let mut items: Vec<CatalogItem> = Vec::new();
        let mut page = 0;
        loop {
            match self.port.fetch_page(category, page, self.page_size).await {
                Ok(batch) => {
                    let received = batch.len();
                    tracing::debug!(%category, page, received, "Fetched catalog page");
                    items.extend(batch);
                    if received < self.page_size || items.len() >= self.max_items {
                        break;
                    }
                    page += 1;
                }
                Err(e) if page == 0 => {
                    tracing::warn!(%category, error = %e, "Catalog fetch failed");
                    return Arc::new(Vec::new());
                }
                Err(e) => {
                    tracing::warn!(
                        %category,
                        page,
                        kept = items.len(),
                        error = %e,
                        "Catalog page failed, keeping partial results"
                    );
                    break;
                }
            }
        }
        items.truncate(self.max_items);

        let items = Arc::new(items);
        self.cache
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(category, Arc::clone(&items));
        tracing::info!(%category, count = items.len(), "Catalog cached");
        items
    }
}
