//! Shared types used across Rigmart crates.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
