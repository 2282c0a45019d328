//! Order entity.

pub mod model;
pub mod status;

pub use model::{Order, OrderItem, OrderView};
pub use status::OrderStatus;
