//! Knowledge-base domain model.
//!
//! # Responsibility
//! - Define the article and category records persisted by the repository.
//! - Provide the default dataset used when storage is empty.
//!
//! # Invariants
//! - Articles reference categories by display name, not id.
//! - Category counts are derived state owned by the repository.

pub mod article;
pub mod category;
pub mod seed;
