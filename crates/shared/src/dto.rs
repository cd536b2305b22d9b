//! JSON bodies exchanged with the site and the catalog API
//!
//! Optional fields are tolerated everywhere: the client adopts what the server
//! sends and keeps its own prediction for the rest.

use serde::{Deserialize, Serialize};

use erbuilds_domain::{CatalogItem, VoteType};

// =============================================================================
// Catalog API
// =============================================================================

/// One item as served by the catalog API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CatalogItemDto> for CatalogItem {
    fn from(dto: CatalogItemDto) -> Self {
        CatalogItem::new(dto.name, dto.description, dto.image)
    }
}

/// `GET {base}/{category}?limit=..&page=..`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPageResponse {
    #[serde(default)]
    pub data: Vec<CatalogItemDto>,
}

impl CatalogPageResponse {
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.data
            .into_iter()
            .filter(|dto| !dto.name.trim().is_empty())
            .map(CatalogItem::from)
            .collect()
    }
}

// =============================================================================
// Site API
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeAction {
    Liked,
    Unliked,
    #[serde(other)]
    Unknown,
}

/// Answer of the grace endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(default)]
    pub action: Option<LikeAction>,
    #[serde(default)]
    pub is_liked: Option<bool>,
    #[serde(default)]
    pub total_likes: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Added,
    Removed,
    Changed,
    #[serde(other)]
    Unknown,
}

/// Answer of the comment vote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub success: bool,
    #[serde(default)]
    pub action: Option<VoteAction>,
    #[serde(default)]
    pub upvotes: Option<u64>,
    #[serde(default)]
    pub downvotes: Option<u64>,
    #[serde(default)]
    pub score: Option<i64>,
    /// `null` once the user's vote was removed
    #[serde(default)]
    pub user_vote: Option<VoteType>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /users/unread-notification-count/`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Error body the site sends with non-2xx answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_page_maps_image_key() {
        let json = r#"{
            "success": true,
            "count": 2,
            "data": [
                {"id": "1", "name": "Moonveil", "image": "https://img/moonveil.png", "description": "Katana"},
                {"id": "2", "name": "Uchigatana"}
            ]
        }"#;
        let page: CatalogPageResponse = serde_json::from_str(json).unwrap();
        let items = page.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].image_url(), Some("https://img/moonveil.png"));
        assert_eq!(items[0].description(), Some("Katana"));
        assert_eq!(items[1].image_url(), None);
    }

    #[test]
    fn missing_data_is_an_empty_page() {
        let page: CatalogPageResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(page.into_items().is_empty());
    }

    #[test]
    fn like_response_parses() {
        let json = r#"{"success": true, "action": "liked", "total_likes": 5, "is_liked": true}"#;
        let response: LikeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.action, Some(LikeAction::Liked));
        assert_eq!(response.is_liked, Some(true));
        assert_eq!(response.total_likes, Some(5));
    }

    #[test]
    fn vote_response_with_removed_vote() {
        let json = r#"{"success": true, "action": "removed", "upvotes": 1, "downvotes": 0, "score": 1, "user_vote": null}"#;
        let response: VoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.action, Some(VoteAction::Removed));
        assert_eq!(response.user_vote, None);
        assert_eq!(response.score, Some(1));
    }

    #[test]
    fn unknown_action_is_tolerated() {
        let json = r#"{"success": true, "action": "boosted"}"#;
        let response: VoteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.action, Some(VoteAction::Unknown));
    }
}
