//! Client-side filtering and ranking of catalog items
//!
//! The catalog API has no search endpoint, so a whole category is fetched once
//! and matched locally against the token being typed.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::value_objects::CatalogItem;

/// Most suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 15;

/// Tokens at least this long also match against the cleaned-up name
const LOOSE_MATCH_MIN_CHARS: usize = 3;

/// Description characters shown under a suggestion
const DESCRIPTION_PREVIEW_CHARS: usize = 80;

/// Shown when an item has no image
pub const PLACEHOLDER_GLYPH: &str = "⚔️";

static ARTICLE_AND_OF_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(the\s+|a\s+)|(\s+of\s+.+)$").expect("valid regex"));

/// Lowercased name without a leading article or a trailing "of ..." clause.
fn core_name(lower_name: &str) -> String {
    ARTICLE_AND_OF_CLAUSE.replace_all(lower_name, "").into_owned()
}

fn matches(lower_name: &str, search: &str) -> bool {
    if lower_name.starts_with(search) || lower_name.contains(search) {
        return true;
    }
    if lower_name
        .split_whitespace()
        .any(|word| word.starts_with(search))
    {
        return true;
    }
    search.chars().count() >= LOOSE_MATCH_MIN_CHARS && core_name(lower_name).contains(search)
}

/// Filter `items` against `token` and order the survivors.
///
/// Names starting with the token come first, shorter names before longer
/// ones; anything else keeps catalog order. At most [`MAX_SUGGESTIONS`] items
/// are returned.
pub fn rank(items: &[CatalogItem], token: &str) -> Vec<CatalogItem> {
    let search = token.trim().to_lowercase();
    if search.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(bool, usize, &CatalogItem)> = items
        .iter()
        .filter_map(|item| {
            let lower = item.name().to_lowercase();
            matches(&lower, &search)
                .then(|| (!lower.starts_with(&search), lower.chars().count(), item))
        })
        .collect();

    ranked.sort_by_key(|(not_prefix, len, _)| (*not_prefix, *len));
    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, _, item)| item.clone())
        .collect()
}

/// One line of the suggestion dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub name: String,
    /// Item image, or `None` to show [`PLACEHOLDER_GLYPH`]
    pub image_url: Option<String>,
    /// First 80 characters of the description followed by `...`
    pub snippet: Option<String>,
}

impl SuggestionRow {
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            name: item.name().to_string(),
            image_url: item.image_url().map(str::to_string),
            snippet: item.description().map(|d| {
                let head: String = d.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
                format!("{}...", head)
            }),
        }
    }

    pub fn icon(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_GLYPH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<CatalogItem> {
        names.iter().map(|n| CatalogItem::named(*n)).collect()
    }

    fn names(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(CatalogItem::name).collect()
    }

    #[test]
    fn prefix_matches_shorter_first() {
        let catalog = items(&["Moonveil", "Moon of Nokstella", "Uchigatana"]);
        let ranked = rank(&catalog, "moon");
        assert_eq!(names(&ranked), vec!["Moonveil", "Moon of Nokstella"]);
    }

    #[test]
    fn prefix_matches_precede_substring_matches() {
        let catalog = items(&["Dark Moon Greatsword", "Moonveil", "Blasphemous Blade"]);
        let ranked = rank(&catalog, "moon");
        assert_eq!(names(&ranked), vec!["Moonveil", "Dark Moon Greatsword"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = items(&["Rivers of Blood"]);
        assert_eq!(names(&rank(&catalog, "BLOOD")), vec!["Rivers of Blood"]);
        assert_eq!(names(&rank(&catalog, "riv")), vec!["Rivers of Blood"]);
    }

    #[test]
    fn word_prefix_matches() {
        let catalog = items(&["Sword of Night and Flame", "Uchigatana"]);
        assert_eq!(
            names(&rank(&catalog, "nig")),
            vec!["Sword of Night and Flame"]
        );
    }

    #[test]
    fn core_name_strips_article_and_of_clause() {
        assert_eq!(core_name("the ring of miquella"), "ring");
        assert_eq!(core_name("a sword of night"), "sword");
        assert_eq!(core_name("moonveil"), "moonveil");
    }

    #[test]
    fn non_matching_items_are_excluded() {
        let catalog = items(&["Uchigatana", "Nagakiba"]);
        assert!(rank(&catalog, "moon").is_empty());
    }

    #[test]
    fn equal_rank_keeps_catalog_order() {
        let catalog = items(&["Moonb", "Moona"]);
        assert_eq!(names(&rank(&catalog, "moon")), vec!["Moonb", "Moona"]);
    }

    #[test]
    fn results_are_capped() {
        let catalog: Vec<CatalogItem> = (0..40)
            .map(|i| CatalogItem::named(format!("Blade {}", i)))
            .collect();
        assert_eq!(rank(&catalog, "blade").len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn row_truncates_description() {
        let long = "x".repeat(120);
        let item = CatalogItem::new("Moonveil", Some(long), None);
        let row = SuggestionRow::from_item(&item);
        assert_eq!(row.snippet.as_deref(), Some(format!("{}...", "x".repeat(80)).as_str()));
        assert_eq!(row.icon(), PLACEHOLDER_GLYPH);
    }

    #[test]
    fn row_uses_item_image() {
        let item = CatalogItem::new("Moonveil", None, Some("https://img/moonveil.png".into()));
        let row = SuggestionRow::from_item(&item);
        assert_eq!(row.icon(), "https://img/moonveil.png");
        assert_eq!(row.snippet, None);
    }
}
