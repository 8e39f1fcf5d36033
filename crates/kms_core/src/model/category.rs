//! Category domain model.
//!
//! # Invariants
//! - `name` is unique among categories.
//! - `count` equals the number of articles whose `category` is `name`.
//!   Only the repository writes this field.

use crate::model::article::ArticleValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier for one category.
pub type CategoryId = u64;

/// Named grouping of articles with a denormalized member count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub count: u64,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, count: u64) -> Self {
        Self {
            id,
            name: name.into(),
            count,
        }
    }
}

/// Category selector used by paginated listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every article.
    #[default]
    All,
    /// Articles in the category with this id.
    Id(CategoryId),
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ArticleValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<CategoryId>()
            .map(Self::Id)
            .map_err(|_| ArticleValidationError::MissingCategory)
    }
}
