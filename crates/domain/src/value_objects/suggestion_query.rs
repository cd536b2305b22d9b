//! The part of a comma-separated field the user is currently typing

/// Tokens shorter than this never trigger a lookup
pub const MIN_TOKEN_CHARS: usize = 2;

/// Recomputed on every keystroke; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery {
    raw_input: String,
    active_token: String,
}

impl SuggestionQuery {
    pub fn parse(raw_input: &str) -> Self {
        let tail = match raw_input.rfind(',') {
            Some(comma) => &raw_input[comma + 1..],
            None => raw_input,
        };
        Self {
            raw_input: raw_input.to_string(),
            active_token: tail.trim().to_string(),
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn active_token(&self) -> &str {
        &self.active_token
    }

    /// Whether the token is long enough to search for.
    pub fn is_searchable(&self) -> bool {
        self.active_token.chars().count() >= MIN_TOKEN_CHARS
    }

    /// Replace the active token with `name` and leave room for the next entry.
    ///
    /// Everything up to and including the last comma is kept.
    pub fn complete_with(&self, name: &str) -> String {
        match self.raw_input.rfind(',') {
            Some(comma) => format!("{} {}, ", &self.raw_input[..=comma], name),
            None => format!("{}, ", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_text_after_last_comma() {
        let query = SuggestionQuery::parse("Rivers of Blood,  moo ");
        assert_eq!(query.active_token(), "moo");
        assert!(query.is_searchable());
    }

    #[test]
    fn whole_value_is_token_without_comma() {
        assert_eq!(SuggestionQuery::parse(" Moon").active_token(), "Moon");
    }

    #[test]
    fn short_tokens_are_not_searchable() {
        assert!(!SuggestionQuery::parse("m").is_searchable());
        assert!(!SuggestionQuery::parse("Moonveil, m").is_searchable());
        assert!(!SuggestionQuery::parse("Moonveil, ").is_searchable());
        assert!(!SuggestionQuery::parse("").is_searchable());
    }

    #[test]
    fn completion_keeps_earlier_entries() {
        let query = SuggestionQuery::parse("Rivers of Blood, moo");
        assert_eq!(
            query.complete_with("Moonveil"),
            "Rivers of Blood, Moonveil, "
        );
    }

    #[test]
    fn completion_of_first_entry() {
        let query = SuggestionQuery::parse("moo");
        assert_eq!(query.complete_with("Moonveil"), "Moonveil, ");
    }
}
