//! Repository implementations, one per aggregate.

pub mod cart;
pub mod category;
pub mod configuration;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;
