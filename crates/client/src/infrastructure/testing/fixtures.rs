//! Simple test fixtures used across unit tests.

use serde_json::{json, Value};

use erbuilds_domain::{CatalogItem, UploadFile, MAX_UPLOAD_BYTES};

use crate::ports::outbound::{ApiError, CatalogError};

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

pub fn catalog_request_failed(msg: &str) -> CatalogError {
    CatalogError::RequestFailed(msg.to_string())
}

/// `n` distinct items named `"{stem} {i}"`.
pub fn catalog_items(stem: &str, n: usize) -> Vec<CatalogItem> {
    (0..n)
        .map(|i| CatalogItem::named(format!("{} {}", stem, i)))
        .collect()
}

pub fn weapons() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            "Moonveil",
            Some("Katana forged from glintstone".to_string()),
            Some("https://eldenring.fanapis.com/images/weapons/moonveil.png".to_string()),
        ),
        CatalogItem::named("Moon of Nokstella"),
        CatalogItem::named("Uchigatana"),
        CatalogItem::named("Rivers of Blood"),
    ]
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

pub fn text_file(name: &str) -> UploadFile {
    UploadFile::new(name, "text/plain", b"notes".to_vec())
}

pub fn oversized_jpeg(name: &str) -> UploadFile {
    let mut file = UploadFile::new(name, "image/jpeg", vec![0xFF, 0xD8]);
    file.size_bytes = MAX_UPLOAD_BYTES + 1;
    file
}

pub fn like_body(is_liked: bool, total_likes: u64) -> Value {
    json!({
        "success": true,
        "action": if is_liked { "liked" } else { "unliked" },
        "is_liked": is_liked,
        "total_likes": total_likes,
    })
}

pub fn vote_body(upvotes: u64, downvotes: u64, user_vote: Option<&str>) -> Value {
    json!({
        "success": true,
        "action": "added",
        "upvotes": upvotes,
        "downvotes": downvotes,
        "score": upvotes as i64 - downvotes as i64,
        "user_vote": user_vote,
    })
}
