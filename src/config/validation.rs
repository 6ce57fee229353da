//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page sizes bounded)
//! - Check addresses and URLs parse before anything binds or connects
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// Largest page the upstream list endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("{field}: unsupported value '{value}'")]
    Unsupported { field: &'static str, value: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field: "upstream.base_url",
            value: config.upstream.base_url.clone(),
            reason: format!("scheme '{}' is not http or https", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field: "upstream.base_url",
            value: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    let positive = [
        ("upstream.timeout_secs", config.upstream.timeout_secs),
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("auth.session_ttl_secs", config.auth.session_ttl_secs),
        ("auth.sweep_interval_secs", config.auth.sweep_interval_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("security.max_body_size", config.security.max_body_size as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    let page_size = config.collections.ratings_page_size;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        errors.push(ValidationError::OutOfRange {
            field: "collections.ratings_page_size",
            value: page_size as u64,
            min: 1,
            max: MAX_PAGE_SIZE as u64,
        });
    }

    if !matches!(config.observability.log_format.as_str(), "compact" | "json") {
        errors.push(ValidationError::Unsupported {
            field: "observability.log_format",
            value: config.observability.log_format.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if !config.auth.login_redirect.starts_with('/') {
        errors.push(ValidationError::Unsupported {
            field: "auth.login_redirect",
            value: config.auth.login_redirect.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.base_url = "ftp://records".into();
        config.upstream.timeout_secs = 0;
        config.collections.ratings_page_size = 5000;
        config.observability.log_format = "xml".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::Zero {
            field: "upstream.timeout_secs"
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidUrl { field: "upstream.base_url", .. })));
    }

    #[test]
    fn test_unparseable_url() {
        let mut config = GatewayConfig::default();
        config.upstream.base_url = "::::".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("upstream.base_url"));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_open_redirect_rejected() {
        let mut config = GatewayConfig::default();
        config.auth.login_redirect = "https://elsewhere.example".into();
        assert!(validate_config(&config).is_err());
    }
}
