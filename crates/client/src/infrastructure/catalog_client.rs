//! HTTP adapter for the public Elden Ring item catalog

use erbuilds_domain::{CatalogCategory, CatalogItem};
use erbuilds_shared::{catalog_page_url, CatalogPageResponse, DEFAULT_CATALOG_BASE_URL};

use crate::ports::outbound::{CatalogError, CatalogPort};

/// Catalog API adapter
#[derive(Clone)]
pub struct CatalogApiAdapter {
    base_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl CatalogApiAdapter {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(base_url: &str, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new(base_url: &str, _timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for CatalogApiAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_BASE_URL, 15_000)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl CatalogPort for CatalogApiAdapter {
    async fn fetch_page(
        &self,
        category: CatalogCategory,
        page: usize,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = catalog_page_url(&self.base_url, category, page, limit);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body: CatalogPageResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(body.into_items())
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl CatalogPort for CatalogApiAdapter {
    async fn fetch_page(
        &self,
        category: CatalogCategory,
        page: usize,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = catalog_page_url(&self.base_url, category, page, limit);
        let response = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        if !response.ok() {
            return Err(CatalogError::HttpStatus {
                status: response.status(),
            });
        }

        let body: CatalogPageResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;
        Ok(body.into_items())
    }
}
