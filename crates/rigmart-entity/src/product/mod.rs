//! Product entity.

pub mod model;

pub use model::{CreateProduct, Product, ProductFilter, ProductWithCategory, UpdateProduct};
