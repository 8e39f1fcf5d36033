//! Article domain model.
//!
//! # Responsibility
//! - Define the persisted article record and its publication status.
//! - Validate and normalize raw editor input before any repository mutation.
//!
//! # Invariants
//! - `id` is assigned by the repository and never changes afterwards.
//! - `title` and `content` are stored trimmed and are never empty.
//! - `category` holds the category display name captured at save time.

use crate::model::category::CategoryId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier for one article.
pub type ArticleId = u64;

/// Author written on every article created through the repository.
///
/// There is no account system, so every new article gets the same name.
pub const DEFAULT_AUTHOR: &str = "Current User";

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Visible to readers.
    Published,
    /// Work in progress.
    Draft,
}

impl ArticleStatus {
    /// Returns the lowercase wire name (`published|draft`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
        }
    }
}

impl Display for ArticleStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = ArticleValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            _ => Err(ArticleValidationError::UnknownStatus(value.to_string())),
        }
    }
}

/// Status selector used by status-filtered listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only articles with the given status.
    Only(ArticleStatus),
}

impl StatusFilter {
    /// Returns whether `status` passes this filter.
    pub fn accepts(self, status: ArticleStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ArticleValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Canonical persisted article record.
///
/// Field order and camelCase names match the `kms_articles` storage payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Category display name, not id.
    pub category: String,
    pub author: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub last_updated: NaiveDate,
    pub views: u64,
    pub status: ArticleStatus,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validation failure for article input.
///
/// Each variant identifies exactly one offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
    /// No category was selected.
    MissingCategory,
    /// Category id does not resolve to a known category.
    UnknownCategory(CategoryId),
    /// Status text is neither `published` nor `draft`.
    UnknownStatus(String),
}

impl ArticleValidationError {
    /// Returns the input field name this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyContent => "content",
            Self::MissingCategory | Self::UnknownCategory(_) => "category",
            Self::UnknownStatus(_) => "status",
        }
    }
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::MissingCategory => write!(f, "category is required"),
            Self::UnknownCategory(id) => write!(f, "invalid category selected: {id}"),
            Self::UnknownStatus(value) => {
                write!(f, "unsupported status `{value}`; expected published|draft")
            }
        }
    }
}

impl Error for ArticleValidationError {}

/// Raw editor input for create/update.
///
/// Values are kept as typed by the user; [`ArticleInput::normalize`] trims and
/// checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInput {
    pub title: String,
    pub category_id: Option<CategoryId>,
    pub content: String,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
}

impl ArticleInput {
    /// Convenience constructor for callers that always have a category.
    pub fn new(
        title: impl Into<String>,
        category_id: CategoryId,
        content: impl Into<String>,
        tags: Vec<String>,
        status: ArticleStatus,
    ) -> Self {
        Self {
            title: title.into(),
            category_id: Some(category_id),
            content: content.into(),
            tags,
            status,
        }
    }

    /// Trims text fields and drops blank tags.
    ///
    /// Category resolution is left to the repository, which owns the
    /// category collection.
    ///
    /// # Errors
    /// - `EmptyTitle`, `MissingCategory`, `EmptyContent`, checked in form order.
    pub fn normalize(&self) -> Result<NormalizedInput, ArticleValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ArticleValidationError::EmptyTitle);
        }
        let category_id = self
            .category_id
            .ok_or(ArticleValidationError::MissingCategory)?;
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ArticleValidationError::EmptyContent);
        }

        Ok(NormalizedInput {
            title: title.to_string(),
            category_id,
            content: content.to_string(),
            tags: normalize_tags(&self.tags),
            status: self.status,
        })
    }
}

/// Input that passed field-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub title: String,
    pub category_id: CategoryId,
    pub content: String,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
}

/// Trims tags and removes blank entries, keeping order and duplicates.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses comma-separated tag text as typed into the editor form.
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        parse_tag_input, ArticleInput, ArticleStatus, ArticleValidationError, StatusFilter,
    };

    #[test]
    fn normalize_trims_fields_and_drops_blank_tags() {
        let input = ArticleInput::new(
            "  Title ",
            2,
            "\n body \t",
            vec![" a ".to_string(), "   ".to_string(), "a".to_string()],
            ArticleStatus::Draft,
        );
        let normalized = input.normalize().unwrap();
        assert_eq!(normalized.title, "Title");
        assert_eq!(normalized.content, "body");
        assert_eq!(normalized.tags, vec!["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn normalize_reports_the_offending_field() {
        let mut input = ArticleInput::new(" ", 1, "body", Vec::new(), ArticleStatus::Draft);
        let err = input.normalize().unwrap_err();
        assert_eq!(err, ArticleValidationError::EmptyTitle);
        assert_eq!(err.field(), "title");

        input.title = "ok".to_string();
        input.category_id = None;
        assert_eq!(input.normalize().unwrap_err().field(), "category");

        input.category_id = Some(1);
        input.content = "   ".to_string();
        assert_eq!(
            input.normalize().unwrap_err(),
            ArticleValidationError::EmptyContent
        );
    }

    #[test]
    fn status_and_filter_parse_case_insensitively() {
        assert_eq!(
            "Published".parse::<ArticleStatus>().unwrap(),
            ArticleStatus::Published
        );
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "draft".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ArticleStatus::Draft)
        );
        assert!(matches!(
            "archived".parse::<StatusFilter>(),
            Err(ArticleValidationError::UnknownStatus(_))
        ));
    }

    #[test]
    fn tag_input_splits_on_commas() {
        assert_eq!(
            parse_tag_input("api, integration ,, development,"),
            vec![
                "api".to_string(),
                "integration".to_string(),
                "development".to_string()
            ]
        );
        assert!(parse_tag_input(" , ").is_empty());
    }
}
