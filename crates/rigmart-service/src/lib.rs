//! # rigmart-service
//!
//! Business logic for the storefront and admin surfaces. Services own the
//! repositories and integration clients and enforce authorization rules;
//! HTTP concerns stay in `rigmart-api`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod configuration;
pub mod context;
pub mod identity;
pub mod notification;
pub mod order;
pub mod user;

pub use context::RequestContext;
