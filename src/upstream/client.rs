//! Record-store HTTP client with timeout and error handling.
//!
//! # Responsibilities
//! - Build endpoint URLs from the configured base
//! - Issue create/authenticate/list calls with a bounded timeout
//! - Map transport, status and decode failures to [`UpstreamError`]
//! - Provide a health probe for startup checks

use std::time::{Duration, Instant};

use axum::http::{header, StatusCode};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::records::{Page, Record};
use crate::upstream::types::{
    AuthResponse, ListQuery, NewUser, PasswordCredentials, UpstreamError, UpstreamResult,
};

/// Client for the record-store collections API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    /// Base URL, always ending in `/` so relative joins append.
    base: Url,
}

impl UpstreamClient {
    /// Create a new client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut base = Url::parse(&config.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(UpstreamError::Client)?;

        tracing::debug!(base_url = %base, "Upstream client initialized");
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> UpstreamResult<Url> {
        Ok(self.base.join(path)?)
    }

    /// Probe `GET /api/health`.
    pub async fn health(&self) -> UpstreamResult<()> {
        let url = self.endpoint("api/health")?;
        self.send("health", self.http.get(url), StatusCode::OK).await?;
        Ok(())
    }

    /// Create a user record. Succeeds only on `201 Created`.
    pub async fn create_user(&self, user: &NewUser) -> UpstreamResult<()> {
        let url = self.endpoint("api/collections/users/records")?;
        self.send("create_user", self.http.post(url).json(user), StatusCode::CREATED)
            .await?;
        Ok(())
    }

    /// Exchange identity and password for an upstream auth token.
    pub async fn auth_with_password(
        &self,
        identity: &str,
        password: &str,
    ) -> UpstreamResult<AuthResponse> {
        let url = self.endpoint("api/collections/users/auth-with-password")?;
        let body = PasswordCredentials { identity, password };
        let resp = self
            .send("auth_with_password", self.http.post(url).json(&body), StatusCode::OK)
            .await?;
        decode(resp).await
    }

    /// Verify a previously issued token by asking upstream to refresh it.
    pub async fn auth_refresh(&self, token: &str) -> UpstreamResult<AuthResponse> {
        let url = self.endpoint("api/collections/users/auth-refresh")?;
        let request = self.http.post(url).header(header::AUTHORIZATION, token);
        let resp = self.send("auth_refresh", request, StatusCode::OK).await?;
        decode(resp).await
    }

    /// Fetch one page of a collection.
    pub async fn list_records(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> UpstreamResult<Page<Record>> {
        let url = self.endpoint(&format!("api/collections/{collection}/records"))?;
        let request = self.http.get(url).query(&query.pairs());
        let resp = self.send("list_records", request, StatusCode::OK).await?;
        decode(resp).await
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> UpstreamResult<Response> {
        let started = Instant::now();
        match request.send().await {
            Ok(resp) if resp.status() == expected => {
                metrics::record_upstream(operation, "ok", started);
                Ok(resp)
            }
            Ok(resp) => {
                metrics::record_upstream(operation, "rejected", started);
                tracing::debug!(operation, status = %resp.status(), "Upstream rejected request");
                Err(UpstreamError::Rejected(resp.status()))
            }
            Err(e) => {
                metrics::record_upstream(operation, "error", started);
                Err(UpstreamError::Unreachable(e))
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> UpstreamResult<T> {
    let body = resp.bytes().await.map_err(UpstreamError::Unreachable)?;
    serde_json::from_slice(&body).map_err(UpstreamError::Unparseable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_join() {
        let c = client("http://127.0.0.1:8090");
        assert_eq!(
            c.endpoint("api/collections/users/records").unwrap().as_str(),
            "http://127.0.0.1:8090/api/collections/users/records"
        );
    }

    #[test]
    fn test_endpoint_join_keeps_base_path() {
        let c = client("http://records.internal/pb");
        assert_eq!(c.base_url().as_str(), "http://records.internal/pb/");
        assert_eq!(
            c.endpoint("api/health").unwrap().as_str(),
            "http://records.internal/pb/api/health"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let c = UpstreamClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
            check_on_startup: false,
        })
        .unwrap();
        assert!(matches!(c.health().await, Err(UpstreamError::Unreachable(_))));
    }
}
