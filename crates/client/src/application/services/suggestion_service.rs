//! Suggestion Service - Autocomplete for comma-separated item fields
//!
//! One [`SuggestionEngine`] is bound to one build form field. It moves through
//! `Idle → Debouncing → Fetching → Showing` and back to `Idle` on selection,
//! Escape or an outside click. A keystroke always restarts the cycle.
//!
//! ## Ordering
//!
//! Every searchable keystroke takes a new debounce ticket. After the debounce
//! sleep and again after the catalog answer, the ticket is checked; a response
//! for an outdated token is dropped and never overwrites a newer list.

use std::sync::{Arc, Mutex, MutexGuard};

use erbuilds_domain::{rank, CatalogCategory, CatalogItem, SuggestionQuery, SuggestionRow};

use crate::application::debounce::{Debouncer, Ticket};
use crate::application::services::CatalogService;
use crate::ports::outbound::SleepPort;

/// Default debounce delay between the last keystroke and the lookup
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

pub const LOADING_MESSAGE: &str = "Searching...";
pub const NO_MATCHES_MESSAGE: &str = "No matches found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    Idle,
    Debouncing,
    Fetching,
    Showing,
}

/// What the dropdown under the field currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    Hidden,
    Loading,
    NoMatches,
    Rows(Vec<SuggestionRow>),
}

impl DropdownView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Status line shown instead of rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::NoMatches => Some(NO_MATCHES_MESSAGE),
            _ => None,
        }
    }
}

/// Result of a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Token too short; dropdown hidden, nothing pending
    Hidden,
    /// A lookup will run once the ticket settles
    Scheduled(Ticket),
}

/// Result of letting a scheduled lookup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Hidden,
    Shown(usize),
    NoMatches,
    /// A newer keystroke or a dismissal took over
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The first suggestion was taken; the form must not submit
    Selected(String),
    Dismissed,
    /// The dropdown is open with nothing to take; the form must not submit
    Suppressed,
    /// Let the key through untouched
    PassThrough,
}

type ChangeListener = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Debug)]
struct FieldState {
    value: String,
    cursor: usize,
    state: SuggestionState,
    view: DropdownView,
    suggestions: Vec<CatalogItem>,
}

pub struct SuggestionEngine {
    field_id: String,
    category: CatalogCategory,
    catalog: Arc<CatalogService>,
    sleep: Arc<dyn SleepPort>,
    debouncer: Debouncer,
    field: Mutex<FieldState>,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl SuggestionEngine {
    pub fn new(
        field_id: impl Into<String>,
        category: CatalogCategory,
        catalog: Arc<CatalogService>,
        sleep: Arc<dyn SleepPort>,
        debounce_ms: u64,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            category,
            catalog,
            sleep,
            debouncer: Debouncer::new(debounce_ms),
            field: Mutex::new(FieldState {
                value: String::new(),
                cursor: 0,
                state: SuggestionState::Idle,
                view: DropdownView::Hidden,
                suggestions: Vec::new(),
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Bind to a build form input by id (`id_weapons`, `id_armor`, ...).
    pub fn for_field(
        field_id: &str,
        catalog: Arc<CatalogService>,
        sleep: Arc<dyn SleepPort>,
        debounce_ms: u64,
    ) -> Option<Self> {
        let category = CatalogCategory::for_field(field_id)?;
        Some(Self::new(field_id, category, catalog, sleep, debounce_ms))
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn category(&self) -> CatalogCategory {
        self.category
    }

    pub fn value(&self) -> String {
        self.lock().value.clone()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    pub fn state(&self) -> SuggestionState {
        self.lock().state
    }

    pub fn view(&self) -> DropdownView {
        self.lock().view.clone()
    }

    pub fn suggestions(&self) -> Vec<CatalogItem> {
        self.lock().suggestions.clone()
    }

    /// Register a callback fired with the new value after a selection.
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Box::new(listener));
    }

    /// Record a keystroke.
    ///
    /// Short tokens hide the dropdown at once and cancel whatever was pending.
    pub fn on_input(&self, raw_value: &str) -> InputOutcome {
        let query = SuggestionQuery::parse(raw_value);
        let mut field = self.lock();
        field.value = raw_value.to_string();
        field.cursor = raw_value.chars().count();

        if !query.is_searchable() {
            self.debouncer.cancel();
            Self::hide(&mut field);
            return InputOutcome::Hidden;
        }

        field.state = SuggestionState::Debouncing;
        InputOutcome::Scheduled(self.debouncer.schedule())
    }

    /// Wait out the debounce for `ticket`, then look up and rank.
    pub async fn settle(&self, ticket: Ticket) -> QueryOutcome {
        self.sleep.sleep_ms(self.debouncer.delay_ms()).await;

        let token = {
            let mut field = self.lock();
            if !self.debouncer.is_current(ticket) {
                return QueryOutcome::Superseded;
            }
            field.state = SuggestionState::Fetching;
            field.view = DropdownView::Loading;
            SuggestionQuery::parse(&field.value)
                .active_token()
                .to_string()
        };

        tracing::debug!(field = %self.field_id, %token, "Looking up suggestions");
        let items = self.catalog.fetch_catalog(self.category).await;
        let ranked = rank(&items, &token);

        let mut field = self.lock();
        if !self.debouncer.is_current(ticket) {
            tracing::debug!(field = %self.field_id, %token, "Dropping stale suggestions");
            return QueryOutcome::Superseded;
        }
        field.state = SuggestionState::Showing;
        if ranked.is_empty() {
            field.view = DropdownView::NoMatches;
            field.suggestions.clear();
            return QueryOutcome::NoMatches;
        }
        let shown = ranked.len();
        field.view = DropdownView::Rows(ranked.iter().map(SuggestionRow::from_item).collect());
        field.suggestions = ranked;
        QueryOutcome::Shown(shown)
    }

    /// A keystroke followed by its lookup, for callers that await each input.
    pub async fn input(&self, raw_value: &str) -> QueryOutcome {
        match self.on_input(raw_value) {
            InputOutcome::Hidden => QueryOutcome::Hidden,
            InputOutcome::Scheduled(ticket) => self.settle(ticket).await,
        }
    }

    /// Replace the token being typed with `item` and close the dropdown.
    pub fn select_item(&self, item: &CatalogItem) -> String {
        let value = {
            let mut field = self.lock();
            let value = SuggestionQuery::parse(&field.value).complete_with(item.name());
            field.value = value.clone();
            field.cursor = value.chars().count();
            self.debouncer.cancel();
            Self::hide(&mut field);
            value
        };

        tracing::debug!(field = %self.field_id, item = item.name(), "Suggestion selected");
        let listeners = self.listeners.lock().unwrap_or_else(|p| p.into_inner());
        for listener in listeners.iter() {
            listener(&value);
        }
        value
    }

    pub fn on_key(&self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => {
                let first = {
                    let field = self.lock();
                    if !field.view.is_visible() {
                        return KeyOutcome::PassThrough;
                    }
                    match field.view {
                        DropdownView::Rows(_) => field.suggestions.first().cloned(),
                        _ => None,
                    }
                };
                match first {
                    Some(item) => KeyOutcome::Selected(self.select_item(&item)),
                    None => KeyOutcome::Suppressed,
                }
            }
            Key::Escape => {
                if self.state() == SuggestionState::Idle {
                    return KeyOutcome::PassThrough;
                }
                self.dismiss();
                KeyOutcome::Dismissed
            }
            Key::Other => KeyOutcome::PassThrough,
        }
    }

    /// Close the dropdown (outside click); the value is left alone.
    pub fn dismiss(&self) {
        let mut field = self.lock();
        self.debouncer.cancel();
        Self::hide(&mut field);
    }

    fn hide(field: &mut FieldState) {
        field.state = SuggestionState::Idle;
        field.view = DropdownView::Hidden;
        field.suggestions.clear();
    }

    fn lock(&self) -> MutexGuard<'_, FieldState> {
        self.field.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::infrastructure::platform::mock::ImmediateSleep;
    use crate::infrastructure::testing::fixtures::weapons;
    use crate::ports::outbound::{CatalogError, CatalogPort, MockCatalogPort};

    fn engine_with(port: MockCatalogPort) -> (SuggestionEngine, ImmediateSleep) {
        let sleep = ImmediateSleep::default();
        let catalog = Arc::new(CatalogService::new(Arc::new(port)));
        let engine = SuggestionEngine::new(
            "id_weapons",
            CatalogCategory::Weapons,
            catalog,
            Arc::new(sleep.clone()),
            DEFAULT_DEBOUNCE_MS,
        );
        (engine, sleep)
    }

    fn weapons_port() -> MockCatalogPort {
        let mut port = MockCatalogPort::new();
        port.expect_fetch_page()
            .returning(|_, _, _| Ok(weapons()));
        port
    }

    #[tokio::test]
    async fn short_token_hides_without_lookup() {
        let mut port = MockCatalogPort::new();
        port.expect_fetch_page().never();
        let (engine, sleep) = engine_with(port);

        assert_eq!(engine.input("m").await, QueryOutcome::Hidden);
        assert_eq!(engine.input("Moonveil, ").await, QueryOutcome::Hidden);
        assert_eq!(engine.state(), SuggestionState::Idle);
        assert_eq!(engine.view(), DropdownView::Hidden);
        assert!(sleep.requested().is_empty());
    }

    #[tokio::test]
    async fn ranked_rows_are_shown() {
        let (engine, sleep) = engine_with(weapons_port());

        assert_eq!(engine.input("moon").await, QueryOutcome::Shown(2));
        assert_eq!(engine.state(), SuggestionState::Showing);
        assert_eq!(sleep.requested(), vec![DEFAULT_DEBOUNCE_MS]);

        let names: Vec<String> = engine
            .suggestions()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["Moonveil", "Moon of Nokstella"]);

        match engine.view() {
            DropdownView::Rows(rows) => {
                assert_eq!(rows[0].icon(), "https://eldenring.fanapis.com/images/weapons/moonveil.png");
                assert_eq!(
                    rows[0].snippet.as_deref(),
                    Some("Katana forged from glintstone...")
                );
                assert_eq!(rows[1].icon(), erbuilds_domain::PLACEHOLDER_GLYPH);
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_matches_view() {
        let (engine, _) = engine_with(weapons_port());
        assert_eq!(engine.input("zzz").await, QueryOutcome::NoMatches);
        assert_eq!(engine.view().message(), Some(NO_MATCHES_MESSAGE));
        assert_eq!(engine.on_key(Key::Enter), KeyOutcome::Suppressed);
        assert_eq!(engine.state(), SuggestionState::Showing);
    }

    #[tokio::test]
    async fn enter_while_retyping_takes_visible_row() {
        let (engine, _) = engine_with(weapons_port());
        engine.input("moon").await;

        assert!(matches!(engine.on_input("moonv"), InputOutcome::Scheduled(_)));
        assert_eq!(engine.state(), SuggestionState::Debouncing);
        assert!(engine.view().is_visible());
        assert_eq!(
            engine.on_key(Key::Enter),
            KeyOutcome::Selected("Moonveil, ".to_string())
        );
        assert_eq!(engine.view(), DropdownView::Hidden);
    }

    #[tokio::test]
    async fn enter_while_searching_is_suppressed() {
        let (engine, _) = engine_with(weapons_port());
        engine.field.lock().unwrap().view = DropdownView::Loading;
        assert_eq!(engine.on_key(Key::Enter), KeyOutcome::Suppressed);
        assert_eq!(engine.on_key(Key::Other), KeyOutcome::PassThrough);
    }

    #[tokio::test]
    async fn newer_keystroke_supersedes_pending_debounce() {
        let (engine, _) = engine_with(weapons_port());

        let first = match engine.on_input("mo") {
            InputOutcome::Scheduled(ticket) => ticket,
            other => panic!("expected a scheduled lookup, got {:?}", other),
        };
        let second = match engine.on_input("moon") {
            InputOutcome::Scheduled(ticket) => ticket,
            other => panic!("expected a scheduled lookup, got {:?}", other),
        };

        assert_eq!(engine.settle(first).await, QueryOutcome::Superseded);
        assert_eq!(engine.settle(second).await, QueryOutcome::Shown(2));
    }

    #[tokio::test]
    async fn short_token_cancels_pending_lookup() {
        let (engine, _) = engine_with(weapons_port());
        let ticket = match engine.on_input("moon") {
            InputOutcome::Scheduled(ticket) => ticket,
            other => panic!("expected a scheduled lookup, got {:?}", other),
        };
        assert_eq!(engine.on_input("m"), InputOutcome::Hidden);
        assert_eq!(engine.settle(ticket).await, QueryOutcome::Superseded);
        assert_eq!(engine.view(), DropdownView::Hidden);
    }

    /// Catalog whose first answer waits until the test releases it.
    struct GatedCatalog {
        gate: tokio::sync::Mutex<Option<tokio::sync::oneshot::Receiver<()>>>,
    }

    #[async_trait::async_trait]
    impl CatalogPort for GatedCatalog {
        async fn fetch_page(
            &self,
            _category: CatalogCategory,
            _page: usize,
            _limit: usize,
        ) -> Result<Vec<CatalogItem>, CatalogError> {
            let gate = self.gate.lock().await.take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(weapons())
        }
    }

    #[tokio::test]
    async fn stale_response_never_overwrites_newer_state() {
        let (release, gate) = tokio::sync::oneshot::channel();
        let port = GatedCatalog {
            gate: tokio::sync::Mutex::new(Some(gate)),
        };
        let catalog = Arc::new(CatalogService::new(Arc::new(port)));
        let engine = SuggestionEngine::new(
            "id_weapons",
            CatalogCategory::Weapons,
            catalog,
            Arc::new(ImmediateSleep::default()),
            DEFAULT_DEBOUNCE_MS,
        );

        let ticket = match engine.on_input("moon") {
            InputOutcome::Scheduled(ticket) => ticket,
            other => panic!("expected a scheduled lookup, got {:?}", other),
        };

        let typing = async {
            // The lookup is now parked on the gate.
            tokio::task::yield_now().await;
            assert_eq!(engine.view(), DropdownView::Loading);
            assert_eq!(engine.on_input("u"), InputOutcome::Hidden);
            let _ = release.send(());
        };

        let (outcome, _) = tokio::join!(engine.settle(ticket), typing);
        assert_eq!(outcome, QueryOutcome::Superseded);
        assert_eq!(engine.view(), DropdownView::Hidden);
        assert!(engine.suggestions().is_empty());
    }

    #[tokio::test]
    async fn selection_splices_value_and_notifies() {
        let (engine, _) = engine_with(weapons_port());
        let notified = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&notified);
        engine.subscribe(move |value| {
            assert_eq!(value, "Rivers of Blood, Moonveil, ");
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(engine.input("Rivers of Blood, moo").await, QueryOutcome::Shown(2));
        let value = engine.select_item(&CatalogItem::named("Moonveil"));

        assert_eq!(value, "Rivers of Blood, Moonveil, ");
        assert_eq!(engine.value(), value);
        assert_eq!(engine.cursor(), value.chars().count());
        assert_eq!(engine.state(), SuggestionState::Idle);
        assert_eq!(engine.view(), DropdownView::Hidden);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn enter_selects_first_suggestion() {
        let (engine, _) = engine_with(weapons_port());
        engine.input("moo").await;
        assert_eq!(
            engine.on_key(Key::Enter),
            KeyOutcome::Selected("Moonveil, ".to_string())
        );
        assert_eq!(engine.on_key(Key::Enter), KeyOutcome::PassThrough);
    }

    #[tokio::test]
    async fn escape_closes_without_touching_value() {
        let (engine, _) = engine_with(weapons_port());
        engine.input("moo").await;
        assert_eq!(engine.on_key(Key::Escape), KeyOutcome::Dismissed);
        assert_eq!(engine.value(), "moo");
        assert_eq!(engine.state(), SuggestionState::Idle);
        assert_eq!(engine.on_key(Key::Escape), KeyOutcome::PassThrough);
    }

    #[tokio::test]
    async fn dismiss_cancels_pending_lookup() {
        let (engine, _) = engine_with(weapons_port());
        let ticket = match engine.on_input("moon") {
            InputOutcome::Scheduled(ticket) => ticket,
            other => panic!("expected a scheduled lookup, got {:?}", other),
        };
        engine.dismiss();
        assert_eq!(engine.settle(ticket).await, QueryOutcome::Superseded);
        assert_eq!(engine.view(), DropdownView::Hidden);
    }

    #[test]
    fn binds_only_known_fields() {
        let catalog = Arc::new(CatalogService::new(Arc::new(MockCatalogPort::new())));
        let sleep: Arc<dyn SleepPort> = Arc::new(ImmediateSleep::default());
        let engine =
            SuggestionEngine::for_field("id_spells", Arc::clone(&catalog), Arc::clone(&sleep), 300)
                .unwrap();
        assert_eq!(engine.category(), CatalogCategory::Incantations);
        assert!(SuggestionEngine::for_field("id_title", catalog, sleep, 300).is_none());
    }
}
