//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the recipe gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Record-store service the gateway fronts.
    pub upstream: UpstreamConfig,

    /// Session and credential handling.
    pub auth: AuthConfig,

    /// Per-collection read settings.
    pub collections: CollectionsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream record-store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the record-store (e.g., "http://127.0.0.1:8090").
    pub base_url: String,

    /// Total timeout for a single upstream call in seconds.
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Probe the upstream health endpoint before accepting traffic.
    pub check_on_startup: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8090".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            check_on_startup: true,
        }
    }
}

/// How protected routes resolve the caller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthStrategy {
    /// `session_id` cookie looked up in the in-memory session store.
    #[default]
    Cookie,
    /// `Authorization` token verified against the upstream refresh endpoint.
    Bearer,
}

impl std::fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStrategy::Cookie => write!(f, "cookie"),
            AuthStrategy::Bearer => write!(f, "bearer"),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub strategy: AuthStrategy,

    /// Session lifetime in seconds; also used as the cookie Max-Age.
    pub session_ttl_secs: u64,

    /// Interval between sweeps of expired sessions in seconds.
    pub sweep_interval_secs: u64,

    /// Mark the session cookie `Secure` (HTTPS-only deployments).
    pub secure_cookie: bool,

    /// Where `POST /auth` redirects after a successful login.
    pub login_redirect: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            strategy: AuthStrategy::Cookie,
            session_ttl_secs: 24 * 60 * 60,
            sweep_interval_secs: 300,
            secure_cookie: false,
            login_redirect: "/".to_string(),
        }
    }
}

/// Collection read configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Relations expanded on `/api/recipes` unless the client asks otherwise.
    pub recipes_expand: Option<String>,

    /// Relations expanded on `/api/ratings` unless the client asks otherwise.
    pub ratings_expand: Option<String>,

    /// Page size used when walking all ratings of a recipe.
    pub ratings_page_size: u32,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            recipes_expand: Some("author".to_string()),
            ratings_expand: Some("user".to_string()),
            ratings_page_size: 200,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("compact" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:8090");
        assert_eq!(config.auth.strategy, AuthStrategy::Cookie);
        assert_eq!(config.auth.session_ttl_secs, 86_400);
        assert_eq!(config.collections.recipes_expand.as_deref(), Some("author"));
        assert_eq!(config.collections.ratings_expand.as_deref(), Some("user"));
    }

    #[test]
    fn test_partial_sections() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://records.internal:8090"

            [auth]
            strategy = "bearer"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.base_url, "http://records.internal:8090");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.auth.strategy, AuthStrategy::Bearer);
        assert_eq!(config.auth.login_redirect, "/");
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<GatewayConfig, _> = toml::from_str(
            r#"
            [auth]
            strategy = "anything-goes"
            "#,
        );
        assert!(result.is_err());
    }
}
