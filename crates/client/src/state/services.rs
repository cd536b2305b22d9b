//! Service wiring for one page
//!
//! `ClientServices` owns the adapters that are shared across components (the
//! site API client and the catalog cache) and hands out per-component
//! controllers bound to them.

use std::sync::Arc;

use erbuilds_domain::ImageFormset;
use url::Url;

use crate::application::services::{
    BuildListController, CatalogService, FormsetController, InteractionService,
    NotificationPoller, SuggestionEngine,
};
use crate::config::ClientConfig;
use crate::infrastructure::{CatalogApiAdapter, SiteApiAdapter};
use crate::ports::outbound::{CatalogPort, SiteApiPort};
use crate::state::Platform;

#[derive(Clone)]
pub struct ClientServices {
    platform: Platform,
    debounce_ms: u64,
    catalog: Arc<CatalogService>,
    interactions: Arc<InteractionService>,
    notifications: Arc<NotificationPoller>,
}

impl ClientServices {
    /// Wire the HTTP adapters described by `config`.
    pub fn new(config: &ClientConfig, platform: Platform) -> Self {
        let api: Arc<dyn SiteApiPort> =
            Arc::new(SiteApiAdapter::new(&config.site_url, config.request_timeout_ms));
        let catalog: Arc<dyn CatalogPort> = Arc::new(CatalogApiAdapter::new(
            &config.catalog_url,
            config.request_timeout_ms,
        ));
        Self::with_ports(config, platform, api, catalog)
    }

    pub fn with_ports(
        config: &ClientConfig,
        platform: Platform,
        api: Arc<dyn SiteApiPort>,
        catalog: Arc<dyn CatalogPort>,
    ) -> Self {
        tracing::debug!(
            site_url = %config.site_url,
            catalog_url = %config.catalog_url,
            debounce_ms = config.debounce_ms,
            "Wiring client services"
        );
        Self {
            debounce_ms: config.debounce_ms,
            catalog: Arc::new(CatalogService::new(catalog)),
            interactions: Arc::new(InteractionService::new(
                Arc::clone(&api),
                platform.notifier(),
            )),
            notifications: Arc::new(NotificationPoller::new(
                api,
                platform.sleep(),
                config.notification_poll_ms,
            )),
            platform,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The catalog cache shared by every suggestion field.
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    pub fn interactions(&self) -> Arc<InteractionService> {
        Arc::clone(&self.interactions)
    }

    pub fn notifications(&self) -> Arc<NotificationPoller> {
        Arc::clone(&self.notifications)
    }

    /// Suggestion engine for a build form input, or `None` for inputs
    /// without a catalog.
    pub fn suggestion_engine(&self, field_id: &str) -> Option<SuggestionEngine> {
        SuggestionEngine::for_field(
            field_id,
            self.catalog(),
            self.platform.sleep(),
            self.debounce_ms,
        )
    }

    pub fn formset_controller(&self, formset: ImageFormset) -> FormsetController {
        FormsetController::new(
            formset,
            self.platform.file_reader(),
            self.platform.notifier(),
        )
    }

    pub fn build_list_controller(&self, current: Url) -> BuildListController {
        BuildListController::new(current, self.platform.sleep())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::create_mock_platform;
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::{MockCatalogPort, MockSiteApiPort};
    use crate::application::services::QueryOutcome;

    fn services(catalog: MockCatalogPort) -> ClientServices {
        let (platform, _) = create_mock_platform();
        ClientServices::with_ports(
            &ClientConfig::default(),
            platform,
            Arc::new(MockSiteApiPort::new()),
            Arc::new(catalog),
        )
    }

    #[test]
    fn engines_exist_only_for_catalog_fields() {
        let services = services(MockCatalogPort::new());
        assert!(services.suggestion_engine("id_weapons").is_some());
        assert!(services.suggestion_engine("id_title").is_none());
    }

    #[tokio::test]
    async fn fields_share_one_catalog_cache() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_fetch_page()
            .times(1)
            .returning(|_, _, _| Ok(fixtures::weapons()));
        let services = services(catalog);

        let first = services.suggestion_engine("id_weapons").unwrap();
        let second = services.suggestion_engine("id_weapons").unwrap();
        assert_eq!(first.input("moon").await, QueryOutcome::Shown(2));
        assert_eq!(second.input("uchi").await, QueryOutcome::Shown(1));
    }
}
