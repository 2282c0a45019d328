//! # rigmart-identity
//!
//! Identity Bridge edge pieces: session-token verification, webhook
//! signature verification, the provider's backend API client, and the
//! request-level route gate. Reconciliation against local rows lives in
//! `rigmart-service`.

pub mod client;
pub mod gate;
pub mod token;
pub mod webhook;

pub use client::{ExternalProfile, IdentityProviderClient};
pub use gate::{Access, RouteGate};
pub use token::{SessionClaims, SessionTokenVerifier};
pub use webhook::{IdentityEvent, IdentityEventKind, WebhookHeaders};
