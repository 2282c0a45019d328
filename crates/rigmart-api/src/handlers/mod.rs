//! HTTP request handlers, one module per domain.

pub mod cart;
pub mod checkout;
pub mod configuration;
pub mod health;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;
pub mod webhook;
