//! # rigmart-entity
//!
//! Entity models mapping the relational schema: users, catalog, carts,
//! orders, saved configurations, and notifications. Each module exposes the
//! row struct plus the create/update payload types used by the repositories.

pub mod cart;
pub mod category;
pub mod configuration;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;
