//! Saved build configuration entity.

pub mod model;

pub use model::{ANONYMOUS_OWNER, Configuration, CreateConfiguration};
