//! # rigmart-payments
//!
//! Integration with the hosted payment provider: the `CheckoutGateway`
//! trait, its HTTP implementation, minor-unit money conversion, and
//! payment webhook signature verification.

pub mod client;
pub mod gateway;
pub mod money;
pub mod session;
pub mod webhook;

pub use client::HostedCheckoutClient;
pub use gateway::CheckoutGateway;
pub use money::to_minor_units;
pub use session::{CheckoutLineItem, CheckoutSession, CreateSessionRequest};
pub use webhook::{PaymentEvent, PaymentEventKind};
