//! Cart entity.

pub mod model;

pub use model::{Cart, CartItem, CartItemDetail, CartView};
