//! Repository layer owning knowledge-base state.
//!
//! # Responsibility
//! - Keep article/category collections and their count invariant together.
//! - Isolate payload encoding and store access from the view layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to storage errors.

pub mod article_repo;
