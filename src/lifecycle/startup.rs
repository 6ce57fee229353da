//! Startup orchestration.
//!
//! Fail fast: an invalid config, an unreachable record-store or a listener
//! that cannot bind stops the process before any traffic is accepted.

use std::path::Path;

use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, GatewayConfig};
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Load the config file if one was given, otherwise validated defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = load_config(path)?;
            tracing::info!(path = %path.display(), "Configuration loaded");
            Ok(config)
        }
        None => {
            let config = GatewayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Probe the record-store once.
pub async fn check_upstream(upstream: &UpstreamClient) -> UpstreamResult<()> {
    match upstream.health().await {
        Ok(()) => {
            tracing::info!(upstream = %upstream.base_url(), "Record service reachable");
            Ok(())
        }
        Err(e) => {
            tracing::error!(upstream = %upstream.base_url(), error = %e, "Record service unreachable");
            Err(e)
        }
    }
}

/// Bind the public listener.
pub async fn bind(config: &GatewayConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .inspect_err(|e| {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
        })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_failure_reported() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        let taken = bind(&config).await.unwrap();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();
        assert!(bind(&config).await.is_err());
    }
}
