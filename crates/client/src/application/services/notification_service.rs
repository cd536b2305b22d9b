//! Notification Service - Polls the unread notification count

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use erbuilds_domain::NotificationBadge;
use erbuilds_shared::{UnreadCountResponse, UNREAD_NOTIFICATION_COUNT_PATH};

use crate::ports::outbound::{ApiError, SiteApiPort, SleepPort};

/// Default time between two polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Stops a [`NotificationPoller`] from another task.
///
/// A stop is final: a poller stopped before `run` starts never polls.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct NotificationPoller {
    api: Arc<dyn SiteApiPort>,
    sleep: Arc<dyn SleepPort>,
    interval_ms: u64,
    badge: Mutex<NotificationBadge>,
    running: AtomicBool,
    stopped: Arc<AtomicBool>,
}

impl NotificationPoller {
    pub fn new(api: Arc<dyn SiteApiPort>, sleep: Arc<dyn SleepPort>, interval_ms: u64) -> Self {
        Self {
            api,
            sleep,
            interval_ms,
            badge: Mutex::new(NotificationBadge::default()),
            running: AtomicBool::new(false),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn badge(&self) -> NotificationBadge {
        *self.badge.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stopped))
    }

    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    /// One poll cycle. Failures are logged and leave the badge unchanged.
    pub async fn poll_once(&self) -> NotificationBadge {
        match self.fetch_count().await {
            Ok(count) => {
                let mut badge = self.badge.lock().unwrap_or_else(|p| p.into_inner());
                if badge.apply(count) {
                    tracing::debug!(count, "Unread notification count changed");
                }
                *badge
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching notification count");
                self.badge()
            }
        }
    }

    /// Poll every interval until stopped. The first poll happens after one interval.
    pub async fn run(&self) {
        let stop = self.stop_handle();
        if stop.is_stopped() {
            tracing::debug!("Notification polling stopped before start");
            return;
        }
        self.running.store(true, Ordering::Release);
        tracing::info!(interval_ms = self.interval_ms, "Notification polling started");
        loop {
            self.sleep.sleep_ms(self.interval_ms).await;
            if stop.is_stopped() {
                break;
            }
            self.poll_once().await;
        }
        self.running.store(false, Ordering::Release);
        tracing::info!("Notification polling stopped");
    }

    async fn fetch_count(&self) -> Result<u64, ApiError> {
        let body = self.api.get_json(UNREAD_NOTIFICATION_COUNT_PATH).await?;
        let response: UnreadCountResponse =
            serde_json::from_value(body).map_err(|e| ApiError::ParseError(e.to_string()))?;
        Ok(response.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use crate::infrastructure::platform::mock::ImmediateSleep;
    use crate::infrastructure::testing::fixtures::api_request_failed;
    use crate::ports::outbound::{MockSiteApiPort, MockSleepPort};
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn badge_follows_count() {
        let mut api = MockSiteApiPort::new();
        let calls = AtomicUsize::new(0);
        api.expect_get_json()
            .with(eq("/users/unread-notification-count/"))
            .returning(move |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({ "count": if n == 0 { 3 } else { 0 } }))
            });
        let poller = NotificationPoller::new(
            Arc::new(api),
            Arc::new(ImmediateSleep::default()),
            DEFAULT_POLL_INTERVAL_MS,
        );

        let badge = poller.poll_once().await;
        assert!(badge.is_visible());
        assert_eq!(badge.text().as_deref(), Some("3"));

        let badge = poller.poll_once().await;
        assert!(!badge.is_visible());
    }

    #[tokio::test]
    async fn errors_leave_badge_unchanged() {
        let mut api = MockSiteApiPort::new();
        let calls = AtomicUsize::new(0);
        api.expect_get_json().returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(json!({ "count": 2 }))
            } else {
                Err(api_request_failed("offline"))
            }
        });
        let poller = NotificationPoller::new(
            Arc::new(api),
            Arc::new(ImmediateSleep::default()),
            DEFAULT_POLL_INTERVAL_MS,
        );

        poller.poll_once().await;
        assert_eq!(poller.poll_once().await.count(), 2);
    }

    #[tokio::test]
    async fn run_polls_each_interval_until_stopped() {
        let mut api = MockSiteApiPort::new();
        api.expect_get_json()
            .times(3)
            .returning(|_| Ok(json!({ "count": 1 })));

        let handle_slot: Arc<Mutex<Option<StopHandle>>> = Arc::new(Mutex::new(None));
        let sleeps = Arc::new(AtomicUsize::new(0));
        let mut sleep = MockSleepPort::new();
        {
            let handle_slot = Arc::clone(&handle_slot);
            let sleeps = Arc::clone(&sleeps);
            sleep
                .expect_sleep_ms()
                .with(eq(DEFAULT_POLL_INTERVAL_MS))
                .returning(move |_| {
                    if sleeps.fetch_add(1, Ordering::SeqCst) == 3 {
                        if let Some(handle) = handle_slot.lock().unwrap().as_ref() {
                            handle.stop();
                        }
                    }
                    Box::pin(std::future::ready(()))
                });
        }

        let poller = NotificationPoller::new(
            Arc::new(api),
            Arc::new(sleep),
            DEFAULT_POLL_INTERVAL_MS,
        );
        *handle_slot.lock().unwrap() = Some(poller.stop_handle());

        poller.run().await;
        assert!(!poller.is_running());
        assert_eq!(sleeps.load(Ordering::SeqCst), 4);
        assert_eq!(poller.badge().count(), 1);
    }

    #[tokio::test]
    async fn stop_before_run_is_kept() {
        let mut api = MockSiteApiPort::new();
        api.expect_get_json().never();
        let mut sleep = MockSleepPort::new();
        sleep.expect_sleep_ms().never();
        let poller = NotificationPoller::new(
            Arc::new(api),
            Arc::new(sleep),
            DEFAULT_POLL_INTERVAL_MS,
        );

        poller.stop_handle().stop();
        poller.run().await;
        assert!(!poller.is_running());
        assert_eq!(poller.badge().count(), 0);
    }
}
