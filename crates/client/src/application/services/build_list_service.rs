//! Build List Service - Filter, sort and search on the build listing
//!
//! Every change produces the URL to navigate to. Search input is debounced so
//! only the last keystroke in a burst navigates.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use url::Url;

use erbuilds_domain::DomainError;
use erbuilds_shared::routes::listing;

use crate::application::debounce::{Debouncer, Ticket};
use crate::ports::outbound::SleepPort;

/// Delay between the last search keystroke and navigation
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSort {
    Newest,
    Oldest,
    Popular,
    MostCommented,
    Alphabetical,
}

impl BuildSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Popular => "popular",
            Self::MostCommented => "most_commented",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for BuildSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "popular" => Ok(Self::Popular),
            "most_commented" => Ok(Self::MostCommented),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(DomainError::parse(format!("Unknown sort: {}", other))),
        }
    }
}

/// The listing's filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildListFilter {
    pub category: Option<String>,
    pub sort: Option<BuildSort>,
    pub search: String,
}

impl BuildListFilter {
    /// Controls as rendered for `url`.
    pub fn from_url(url: &Url) -> Self {
        let mut filter = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                listing::CATEGORY if filter.category.is_none() && !value.is_empty() => {
                    filter.category = Some(value.into_owned());
                }
                listing::SORT if filter.sort.is_none() => {
                    filter.sort = value.parse().ok();
                }
                listing::SEARCH if filter.search.is_empty() => {
                    filter.search = value.into_owned();
                }
                _ => {}
            }
        }
        filter
    }

    /// `current` with this filter applied and pagination reset.
    pub fn apply_to(&self, current: &Url) -> Url {
        let mut url = current.clone();
        let category = self.category.as_deref().filter(|c| !c.is_empty());
        let search = Some(self.search.trim()).filter(|s| !s.is_empty());
        set_param(&mut url, listing::CATEGORY, category);
        set_param(&mut url, listing::SORT, self.sort.as_ref().map(BuildSort::as_str));
        set_param(&mut url, listing::SEARCH, search);
        set_param(&mut url, listing::PAGE, None);
        url
    }
}

/// The build detail URL with comments ordered by `sort`.
pub fn comment_sort_url(current: &Url, sort: &str) -> Url {
    let mut url = current.clone();
    set_param(&mut url, listing::COMMENT_SORT, Some(sort));
    url
}

/// Set `key` in place (first occurrence) or append it; `None` deletes it.
fn set_param(url: &mut Url, key: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (k, v) in url.query_pairs() {
        if k == key {
            if let (Some(value), false) = (value, replaced) {
                pairs.push((k.into_owned(), value.to_string()));
            }
            replaced = true;
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if let (Some(value), false) = (value, replaced) {
        pairs.push((key.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Listing page controller
pub struct BuildListController {
    current: Url,
    filter: Mutex<BuildListFilter>,
    sleep: Arc<dyn SleepPort>,
    search_debounce: Debouncer,
}

impl BuildListController {
    pub fn new(current: Url, sleep: Arc<dyn SleepPort>) -> Self {
        let filter = BuildListFilter::from_url(&current);
        Self {
            current,
            filter: Mutex::new(filter),
            sleep,
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE_MS),
        }
    }

    pub fn filter(&self) -> BuildListFilter {
        self.filter.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn set_category(&self, category: Option<String>) -> Url {
        let mut filter = self.filter.lock().unwrap_or_else(|p| p.into_inner());
        filter.category = category;
        filter.apply_to(&self.current)
    }

    pub fn set_sort(&self, sort: Option<BuildSort>) -> Url {
        let mut filter = self.filter.lock().unwrap_or_else(|p| p.into_inner());
        filter.sort = sort;
        filter.apply_to(&self.current)
    }

    /// Record a search keystroke; navigation waits for [`Self::settle_search`].
    pub fn on_search_input(&self, text: &str) -> Ticket {
        self.filter
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .search = text.to_string();
        self.search_debounce.schedule()
    }

    /// The URL to navigate to, or `None` when a newer keystroke took over.
    pub async fn settle_search(&self, ticket: Ticket) -> Option<Url> {
        self.sleep.sleep_ms(self.search_debounce.delay_ms()).await;
        if !self.search_debounce.is_current(ticket) {
            return None;
        }
        let url = self.filter().apply_to(&self.current);
        tracing::debug!(%url, "Search navigation");
        Some(url)
    }

    pub async fn search(&self, text: &str) -> Option<Url> {
        let ticket = self.on_search_input(text);
        self.settle_search(ticket).await
    }
}
