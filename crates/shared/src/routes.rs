//! Site endpoints and query-string conventions

use erbuilds_domain::{BuildId, CatalogCategory, CommentId, VoteType};

/// Items requested per catalog page
pub const CATALOG_PAGE_SIZE: usize = 100;

/// Pagination stops once this many items are accumulated
pub const CATALOG_MAX_ITEMS: usize = 500;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://eldenring.fanapis.com/api";

pub const UNREAD_NOTIFICATION_COUNT_PATH: &str = "/users/unread-notification-count/";

/// Header marking a request as AJAX so the site answers with JSON
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Query parameters of the build listing
pub mod listing {
    pub const CATEGORY: &str = "category";
    pub const SORT: &str = "sort";
    pub const SEARCH: &str = "search";
    pub const PAGE: &str = "page";
    pub const COMMENT_SORT: &str = "comment_sort";
}

pub fn like_path(build_id: BuildId) -> String {
    format!("/build/{}/like/", build_id)
}

pub fn vote_path(comment_id: CommentId, vote: VoteType) -> String {
    format!("/comment/{}/vote/{}/", comment_id, vote)
}

pub fn catalog_page_url(
    base: &str,
    category: CatalogCategory,
    page: usize,
    limit: usize,
) -> String {
    format!(
        "{}/{}?limit={}&page={}",
        base.trim_end_matches('/'),
        category,
        limit,
        page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_paths() {
        assert_eq!(like_path(BuildId::new(12)), "/build/12/like/");
        assert_eq!(
            vote_path(CommentId::new(7), VoteType::Downvote),
            "/comment/7/vote/downvote/"
        );
    }

    #[test]
    fn catalog_url_has_limit_and_page() {
        assert_eq!(
            catalog_page_url(
                "https://eldenring.fanapis.com/api/",
                CatalogCategory::Armors,
                2,
                CATALOG_PAGE_SIZE
            ),
            "https://eldenring.fanapis.com/api/armors?limit=100&page=2"
        );
    }
}
