//! Prefix-based route gate.
//!
//! Paths are classified public or protected by configured prefix lists.
//! The public list wins on overlap; anything unlisted defaults to
//! protected so new routes fail closed.

use rigmart_core::config::gate::GateConfig;

/// How a path may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session token required.
    Public,
    /// A valid session token is required.
    Protected,
}

/// Classifies request paths against the configured prefix lists.
#[derive(Debug, Clone)]
pub struct RouteGate {
    public: Vec<String>,
    protected: Vec<String>,
}

impl RouteGate {
    /// Build a gate from configuration.
    pub fn new(config: &GateConfig) -> Self {
        Self {
            public: config.public_paths.clone(),
            protected: config.protected_paths.clone(),
        }
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> Access {
        if self.public.iter().any(|p| prefix_matches(p, path)) {
            return Access::Public;
        }
        if self.protected.iter().any(|p| prefix_matches(p, path)) {
            return Access::Protected;
        }
        Access::Protected
    }

    /// Whether a path may be served without a session token.
    pub fn is_public(&self, path: &str) -> bool {
        self.classify(path) == Access::Public
    }
}

/// Match on path-segment boundaries: `/products` matches `/products` and
/// `/products/42` but not `/productszzz`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> RouteGate {
        RouteGate::new(&GateConfig {
            public_paths: vec![
                "/health".to_string(),
                "/products".to_string(),
                "/webhooks".to_string(),
            ],
            protected_paths: vec!["/cart".to_string(), "/orders".to_string()],
        })
    }

    #[test]
    fn test_public_prefix() {
        let gate = gate();
        assert_eq!(gate.classify("/products"), Access::Public);
        assert_eq!(gate.classify("/products/42"), Access::Public);
        assert_eq!(gate.classify("/webhooks/identity"), Access::Public);
    }

    #[test]
    fn test_protected_prefix() {
        let gate = gate();
        assert_eq!(gate.classify("/cart/items"), Access::Protected);
        assert_eq!(gate.classify("/orders"), Access::Protected);
    }

    #[test]
    fn test_unlisted_defaults_to_protected() {
        assert_eq!(gate().classify("/admin/metrics"), Access::Protected);
    }

    #[test]
    fn test_no_partial_segment_match() {
        assert_eq!(gate().classify("/productszzz"), Access::Protected);
    }

    #[test]
    fn test_public_wins_over_protected() {
        let gate = RouteGate::new(&GateConfig {
            public_paths: vec!["/orders/track".to_string()],
            protected_paths: vec!["/orders".to_string()],
        });
        assert_eq!(gate.classify("/orders/track/123"), Access::Public);
        assert_eq!(gate.classify("/orders/9"), Access::Protected);
    }
}
