//! Notification entity.

pub mod model;
pub mod recipient;

pub use model::{CreateNotification, Notification};
pub use recipient::Recipient;
