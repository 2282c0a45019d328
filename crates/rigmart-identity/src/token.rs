//! Session-token verification.
//!
//! The identity provider issues RS256-signed session tokens; the `sub`
//! claim carries the external user id all local state is keyed on.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use rigmart_core::config::identity::IdentityConfig;
use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

/// Claims carried by a verified session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// External user id.
    pub sub: String,
    /// Token issuer.
    pub iss: String,
    /// Expiration (unix seconds).
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: Option<i64>,
}

/// Verifies session tokens against the provider's public key.
pub struct SessionTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for SessionTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenVerifier").finish_non_exhaustive()
    }
}

impl SessionTokenVerifier {
    /// Build a verifier from the identity configuration.
    pub fn new(config: &IdentityConfig) -> AppResult<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key_pem.as_bytes())
            .map_err(|e| {
                AppError::configuration(format!("Invalid identity provider public key: {e}"))
            })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&config.issuer]);

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a raw token and return its claims.
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthenticated(format!("Invalid session token: {e}")))
    }
}
