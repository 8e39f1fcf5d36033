//! Use-case services layered over the repository.
//!
//! # Responsibility
//! - Hold view-facing navigation state (page, page size, filter).
//! - Keep CLI/view layers free of pagination arithmetic.

pub mod browse_service;
