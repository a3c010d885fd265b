// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;
pub mod retry;

pub use cache::{CacheKey, CatalogCache};
pub use catalog::{parse_catalog, CatalogError, FailureKind, RemoteCatalog, SchoolCatalog};
pub use postgres::PostgresCatalog;
pub use retry::{retry_with_backoff, RetryPolicy, Retryable};
