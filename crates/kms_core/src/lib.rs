//! Core state manager for the knowledge-base admin tool.
//! This crate is the single source of truth for article/category invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, KmsConfig};
pub use export::{export_articles_json, write_export, ExportError, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::article::{
    parse_tag_input, Article, ArticleId, ArticleInput, ArticleStatus, ArticleValidationError,
    StatusFilter, DEFAULT_AUTHOR,
};
pub use model::category::{Category, CategoryFilter, CategoryId};
pub use repo::article_repo::{
    ArticlePage, ArticleRepository, KnowledgeBaseStats, RepoError, RepoResult, DEFAULT_PAGE_SIZE,
};
pub use search::{SearchQuery, MIN_QUERY_LEN};
pub use service::browse_service::{BrowseSession, PaginationInfo};
pub use store::{
    KeyValueStore, MemoryStore, SqliteKvStore, StoreError, StoreResult, ARTICLES_KEY,
    CATEGORIES_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
