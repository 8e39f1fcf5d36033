//! Article/category repository over a key-value store.
//!
//! # Responsibility
//! - Own the in-memory article and category collections.
//! - Serve category-filtered pages, search, status filters and stats.
//! - Apply create/update/delete/view and persist after each of them.
//!
//! # Invariants
//! - For every category, `count` equals the number of articles whose
//!   `category` is that category's name, after every public call returns.
//! - Validation happens before any mutation; a failed call changes nothing.
//! - A mutation whose store write fails is rolled back in memory.
//! - New ids are `max(existing ids) + 1` (or 1), so the highest id is reused
//!   after it is deleted.
//! - Stored payloads with duplicate article ids, category ids or category
//!   names are rejected at load.

use crate::clock::{Clock, SystemClock};
use crate::model::article::{
    Article, ArticleId, ArticleInput, ArticleStatus, ArticleValidationError, NormalizedInput,
    StatusFilter, DEFAULT_AUTHOR,
};
use crate::model::category::{Category, CategoryFilter, CategoryId};
use crate::model::seed::{default_articles, default_categories};
use crate::search::SearchQuery;
use crate::store::{KeyValueStore, StoreError, ARTICLES_KEY, CATEGORIES_KEY};
use log::{error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Page size used when callers pass `0`.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error surfaced to the view layer.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before any mutation.
    Validation(ArticleValidationError),
    /// No article with this id.
    NotFound(ArticleId),
    /// Store write failed; in-memory state was rolled back.
    Store(StoreError),
    /// Collections could not be encoded for storage.
    Serialize(serde_json::Error),
    /// Stored payload decoded but breaks a uniqueness rule.
    InconsistentPayload(String),
    /// The highest article id leaves no room for another one.
    IdSpaceExhausted,
    /// The article's view counter is already at its maximum.
    ViewCountOverflow(ArticleId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode knowledge base: {err}"),
            Self::InconsistentPayload(reason) => {
                write!(f, "stored knowledge base is inconsistent: {reason}")
            }
            Self::IdSpaceExhausted => write!(f, "no article id left to assign"),
            Self::ViewCountOverflow(id) => write!(f, "view counter overflow for article {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::NotFound(_)
            | Self::InconsistentPayload(_)
            | Self::IdSpaceExhausted
            | Self::ViewCountOverflow(_) => None,
        }
    }
}

impl From<ArticleValidationError> for RepoError {
    fn from(value: ArticleValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// One page of a category-filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    /// Articles on this page, in collection order.
    pub items: Vec<Article>,
    /// Filtered article count before pagination.
    pub total: usize,
    /// Effective 1-based page number.
    pub page: u32,
    /// Effective page size.
    pub page_size: u32,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeBaseStats {
    pub total_articles: usize,
    pub total_categories: usize,
    pub distinct_author_count: usize,
    /// Saturates at `u64::MAX`.
    pub total_views: u64,
    /// `round(published / total * 100)`, `0` when there are no articles.
    pub published_ratio_percent: u32,
}

#[derive(Debug, Clone)]
struct Snapshot {
    articles: Vec<Article>,
    categories: Vec<Category>,
}

/// Repository owning the knowledge-base state and its persistence.
pub struct ArticleRepository<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    articles: Vec<Article>,
    categories: Vec<Category>,
}

impl<S: KeyValueStore> ArticleRepository<S> {
    /// Loads state from `store` using the wall clock for date stamps.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ArticleRepository<S, C> {
    /// Loads both collections from `store`.
    ///
    /// Missing, unreadable or malformed payloads fall back to the default
    /// dataset; the failure is logged, never returned. Loaded category counts
    /// are recomputed from the articles.
    pub fn load_with_clock(store: S, clock: C) -> Self {
        let (articles, categories) = match read_persisted(&store) {
            Ok(Some(snapshot)) => {
                info!(
                    "event=kb_load module=repo status=ok source=store articles={} categories={}",
                    snapshot.articles.len(),
                    snapshot.categories.len()
                );
                (snapshot.articles, snapshot.categories)
            }
            Ok(None) => {
                info!("event=kb_load module=repo status=ok source=seed reason=missing");
                (default_articles(), default_categories())
            }
            Err(err) => {
                warn!(
                    "event=kb_load module=repo status=fallback source=seed error_code=load_failed error={err}"
                );
                (default_articles(), default_categories())
            }
        };

        let mut repo = Self {
            store,
            clock,
            articles,
            categories,
        };
        let corrected = recount_categories(&mut repo.categories, &repo.articles);
        if corrected > 0 {
            warn!("event=kb_load module=repo status=repaired corrected_counts={corrected}");
        }
        repo
    }

    /// Writes both collections to the store as one unit.
    pub fn persist(&mut self) -> RepoResult<()> {
        let articles = serde_json::to_string(&self.articles)?;
        let categories = serde_json::to_string(&self.categories)?;
        self.store
            .set_many(&[(ARTICLES_KEY, articles), (CATEGORIES_KEY, categories)])?;
        Ok(())
    }

    /// All articles in collection order (newest creates first).
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// All categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the repository and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Lists one page of articles restricted by `filter`.
    ///
    /// An unknown category id yields an empty listing. Pages past the end
    /// are empty, not errors. `page = 0` is read as page 1 and
    /// `page_size = 0` as [`DEFAULT_PAGE_SIZE`].
    pub fn list_articles(&self, filter: CategoryFilter, page: u32, page_size: u32) -> ArticlePage {
        let page = page.max(1);
        let page_size = effective_page_size(page_size);
        let filtered = self.filtered(filter);
        let total = filtered.len();
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let items = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        ArticlePage {
            items,
            total,
            page,
            page_size,
        }
    }

    /// Number of pages for `filter` at `page_size`; `0` when nothing matches.
    pub fn total_pages(&self, filter: CategoryFilter, page_size: u32) -> u32 {
        let page_size = effective_page_size(page_size) as usize;
        let total = self.filtered(filter).len();
        total.div_ceil(page_size) as u32
    }

    /// Searches title, content and tags.
    ///
    /// Returns `None` for queries too short to search; callers fall back to
    /// the regular listing.
    pub fn search(&self, raw_query: &str) -> Option<Vec<Article>> {
        let query = SearchQuery::parse(raw_query)?;
        Some(
            self.articles
                .iter()
                .filter(|article| query.matches(article))
                .cloned()
                .collect(),
        )
    }

    /// Articles whose status passes `filter`, in collection order.
    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<Article> {
        self.articles
            .iter()
            .filter(|article| filter.accepts(article.status))
            .cloned()
            .collect()
    }

    pub fn get_by_id(&self, id: ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    /// Reads an article for display and counts the view.
    ///
    /// Every call increments `views` by one and persists.
    pub fn view(&mut self, id: ArticleId) -> RepoResult<Article> {
        let index = self.position(id)?;
        let views = self.articles[index]
            .views
            .checked_add(1)
            .ok_or(RepoError::ViewCountOverflow(id))?;
        let snapshot = self.snapshot();

        self.articles[index].views = views;
        self.commit(snapshot, "article_view", id)?;
        Ok(self.articles[index].clone())
    }

    /// Creates an article at the front of the collection.
    ///
    /// # Errors
    /// - `Validation` for blank title/content or an unresolvable category.
    /// - `IdSpaceExhausted` when the highest stored id is `u64::MAX`.
    /// - `Store` when persistence fails (state is rolled back).
    pub fn create(&mut self, input: &ArticleInput) -> RepoResult<Article> {
        let (fields, category_name) = self.resolve(input)?;
        let id = self.next_id()?;
        let snapshot = self.snapshot();

        let article = Article {
            id,
            title: fields.title,
            category: category_name,
            author: DEFAULT_AUTHOR.to_string(),
            last_updated: self.clock.today(),
            views: 0,
            status: fields.status,
            content: fields.content,
            tags: fields.tags,
        };
        move_category_count(&mut self.categories, None, Some(article.category.as_str()));
        self.articles.insert(0, article);

        self.commit(snapshot, "article_create", id)?;
        Ok(self.articles[0].clone())
    }

    /// Replaces the editable fields of an existing article.
    ///
    /// Keeps `id`, `author` and `views`; stamps `lastUpdated` with today.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Validation` under the same rules as [`Self::create`].
    pub fn update(&mut self, id: ArticleId, input: &ArticleInput) -> RepoResult<Article> {
        let index = self.position(id)?;
        let (fields, category_name) = self.resolve(input)?;
        let snapshot = self.snapshot();
        let today = self.clock.today();

        let article = &mut self.articles[index];
        move_category_count(
            &mut self.categories,
            Some(article.category.as_str()),
            Some(category_name.as_str()),
        );
        article.title = fields.title;
        article.category = category_name;
        article.content = fields.content;
        article.tags = fields.tags;
        article.status = fields.status;
        article.last_updated = today;

        self.commit(snapshot, "article_update", id)?;
        Ok(self.articles[index].clone())
    }

    /// Removes an article and returns it.
    pub fn delete(&mut self, id: ArticleId) -> RepoResult<Article> {
        let index = self.position(id)?;
        let snapshot = self.snapshot();

        let removed = self.articles.remove(index);
        move_category_count(&mut self.categories, Some(removed.category.as_str()), None);

        self.commit(snapshot, "article_delete", id)?;
        Ok(removed)
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        let total_articles = self.articles.len();
        let authors: BTreeSet<&str> = self
            .articles
            .iter()
            .map(|article| article.author.as_str())
            .collect();
        let published = self
            .articles
            .iter()
            .filter(|article| article.status == ArticleStatus::Published)
            .count();
        let published_ratio_percent = if total_articles == 0 {
            0
        } else {
            ((published as f64 / total_articles as f64) * 100.0).round() as u32
        };

        KnowledgeBaseStats {
            total_articles,
            total_categories: self.categories.len(),
            distinct_author_count: authors.len(),
            total_views: self
                .articles
                .iter()
                .fold(0, |total: u64, article| total.saturating_add(article.views)),
            published_ratio_percent,
        }
    }

    fn filtered(&self, filter: CategoryFilter) -> Vec<&Article> {
        match filter {
            CategoryFilter::All => self.articles.iter().collect(),
            CategoryFilter::Id(id) => match self.category_by_id(id) {
                Some(category) => self
                    .articles
                    .iter()
                    .filter(|article| article.category == category.name)
                    .collect(),
                None => Vec::new(),
            },
        }
    }

    fn position(&self, id: ArticleId) -> RepoResult<usize> {
        self.articles
            .iter()
            .position(|article| article.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn resolve(&self, input: &ArticleInput) -> RepoResult<(NormalizedInput, String)> {
        let fields = input.normalize()?;
        let category_name = self
            .category_by_id(fields.category_id)
            .map(|category| category.name.clone())
            .ok_or(ArticleValidationError::UnknownCategory(fields.category_id))?;
        Ok((fields, category_name))
    }

    fn next_id(&self) -> RepoResult<ArticleId> {
        match self.articles.iter().map(|article| article.id).max() {
            Some(max) => max.checked_add(1).ok_or(RepoError::IdSpaceExhausted),
            None => Ok(1),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            articles: self.articles.clone(),
            categories: self.categories.clone(),
        }
    }

    fn commit(
        &mut self,
        snapshot: Snapshot,
        event: &'static str,
        id: ArticleId,
    ) -> RepoResult<()> {
        match self.persist() {
            Ok(()) => {
                info!("event={event} module=repo status=ok article_id={id}");
                Ok(())
            }
            Err(err) => {
                self.articles = snapshot.articles;
                self.categories = snapshot.categories;
                error!(
                    "event={event} module=repo status=error article_id={id} error_code=persist_failed error={err}"
                );
                Err(err)
            }
        }
    }
}

fn effective_page_size(page_size: u32) -> u32 {
    if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

fn read_persisted<S: KeyValueStore>(store: &S) -> RepoResult<Option<Snapshot>> {
    let articles = store.get(ARTICLES_KEY)?;
    let categories = store.get(CATEGORIES_KEY)?;
    match (articles, categories) {
        (Some(articles), Some(categories)) => {
            let snapshot = Snapshot {
                articles: serde_json::from_str(&articles)?,
                categories: serde_json::from_str(&categories)?,
            };
            check_unique(&snapshot)?;
            Ok(Some(snapshot))
        }
        _ => Ok(None),
    }
}

/// Rejects payloads whose ids or category names collide.
///
/// Counts are keyed by category name, so two categories sharing a name
/// could never both stay correct.
fn check_unique(snapshot: &Snapshot) -> RepoResult<()> {
    let inconsistent = |reason: String| Err(RepoError::InconsistentPayload(reason));

    let mut article_ids = BTreeSet::new();
    for article in &snapshot.articles {
        if !article_ids.insert(article.id) {
            return inconsistent(format!("duplicate article id {}", article.id));
        }
    }

    let mut category_ids = BTreeSet::new();
    let mut category_names = BTreeSet::new();
    for category in &snapshot.categories {
        if !category_ids.insert(category.id) {
            return inconsistent(format!("duplicate category id {}", category.id));
        }
        if !category_names.insert(category.name.as_str()) {
            return inconsistent(format!("duplicate category name `{}`", category.name));
        }
    }
    Ok(())
}

/// Moves one unit of count from `from` to `to`.
///
/// The single place where category counts change after load. Decrements
/// floor at zero; unknown names are ignored.
fn move_category_count(categories: &mut [Category], from: Option<&str>, to: Option<&str>) {
    if from == to {
        return;
    }
    if let Some(name) = from {
        if let Some(category) = categories.iter_mut().find(|c| c.name == name) {
            category.count = category.count.saturating_sub(1);
        }
    }
    if let Some(name) = to {
        if let Some(category) = categories.iter_mut().find(|c| c.name == name) {
            category.count += 1;
        }
    }
}

/// Recomputes every count from `articles`; returns how many were wrong.
fn recount_categories(categories: &mut [Category], articles: &[Article]) -> usize {
    let mut corrected = 0;
    for category in categories.iter_mut() {
        let actual = articles
            .iter()
            .filter(|article| article.category == category.name)
            .count() as u64;
        if category.count != actual {
            category.count = actual;
            corrected += 1;
        }
    }
    corrected
}
