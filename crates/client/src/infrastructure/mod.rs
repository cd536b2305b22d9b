pub mod catalog_client;
pub mod file_reader;
pub mod http_client;
pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog_client::CatalogApiAdapter;
pub use file_reader::DataUrlReader;
pub use http_client::SiteApiAdapter;
