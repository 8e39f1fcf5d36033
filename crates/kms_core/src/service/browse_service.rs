//! Browse session for paginated, category-filtered listings.
//!
//! # Responsibility
//! - Track the current page, page size and category filter of one viewer.
//! - Compute pagination controls from repository totals.
//!
//! # Invariants
//! - `current_page` is 1-based and never drops below 1.
//! - Changing the category filter resets to page 1.
//! - `next_page` never moves past the last page.

use crate::clock::Clock;
use crate::model::category::CategoryFilter;
use crate::repo::article_repo::{ArticlePage, ArticleRepository, DEFAULT_PAGE_SIZE};
use crate::store::KeyValueStore;
use std::fmt::{Display, Formatter};

/// Pagination controls for the active listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: u32,
    /// `0` when the filtered listing is empty.
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Display for PaginationInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Navigation state for one viewer of the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseSession {
    current_page: u32,
    page_size: u32,
    filter: CategoryFilter,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl BrowseSession {
    /// Starts on page 1 of all articles. A zero `page_size` uses the default.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            filter: CategoryFilter::All,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Switches the category filter and rewinds to page 1.
    pub fn filter_by_category(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// Jumps to `page` without bounds checks; out-of-range pages list empty.
    pub fn go_to_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Advances one page if a later page exists. Returns whether it moved.
    pub fn next_page<S: KeyValueStore, C: Clock>(
        &mut self,
        repo: &ArticleRepository<S, C>,
    ) -> bool {
        if self.current_page < repo.total_pages(self.filter, self.page_size) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page unless already on page 1. Returns whether it moved.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Articles for the current page and filter.
    pub fn current_listing<S: KeyValueStore, C: Clock>(
        &self,
        repo: &ArticleRepository<S, C>,
    ) -> ArticlePage {
        repo.list_articles(self.filter, self.current_page, self.page_size)
    }

    pub fn pagination<S: KeyValueStore, C: Clock>(
        &self,
        repo: &ArticleRepository<S, C>,
    ) -> PaginationInfo {
        let total_pages = repo.total_pages(self.filter, self.page_size);
        PaginationInfo {
            current_page: self.current_page,
            total_pages,
            has_previous: self.current_page > 1,
            has_next: self.current_page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowseSession, PaginationInfo};
    use crate::model::category::CategoryFilter;

    #[test]
    fn new_session_starts_on_first_page_of_everything() {
        let session = BrowseSession::default();
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.page_size(), 5);
        assert_eq!(session.filter(), CategoryFilter::All);
        assert_eq!(BrowseSession::new(0).page_size(), 5);
    }

    #[test]
    fn previous_page_stops_at_one() {
        let mut session = BrowseSession::new(3);
        assert!(!session.previous_page());
        session.go_to_page(3);
        assert!(session.previous_page());
        assert_eq!(session.current_page(), 2);
    }

    #[test]
    fn filter_change_rewinds_to_first_page() {
        let mut session = BrowseSession::default();
        session.go_to_page(4);
        session.filter_by_category(CategoryFilter::Id(2));
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.filter(), CategoryFilter::Id(2));
    }

    #[test]
    fn pagination_renders_page_label() {
        let info = PaginationInfo {
            current_page: 2,
            total_pages: 3,
            has_previous: true,
            has_next: true,
        };
        assert_eq!(info.to_string(), "Page 2 of 3");
    }
}
