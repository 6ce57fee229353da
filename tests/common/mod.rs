//! Shared utilities for gateway integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use recipe_gateway::config::{AuthStrategy, GatewayConfig};
use recipe_gateway::{HttpServer, SessionStore, Shutdown};
use tokio::net::TcpListener;

/// A request as seen by the mock record-store.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: String,
}

type Responder = dyn Fn(MockRequest) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    responder: Arc<Responder>,
    hits: Arc<AtomicUsize>,
}

/// Handle to a running mock record-store.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests the mock has served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a programmable mock record-store on an ephemeral port.
pub async fn start_programmable_upstream<F>(f: F) -> MockUpstream
where
    F: Fn(MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        responder: Arc::new(f),
        hits: hits.clone(),
    };
    let app = Router::new().fallback(respond).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, hits }
}

async fn respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let request = MockRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let (status, body) = (state.responder)(request);
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// A running gateway.
#[allow(dead_code)]
pub struct Gateway {
    pub addr: SocketAddr,
    pub sessions: SessionStore,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

#[allow(dead_code)]
pub fn config_for(upstream: &MockUpstream, strategy: AuthStrategy) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = upstream.base_url();
    config.upstream.check_on_startup = false;
    config.upstream.timeout_secs = 5;
    config.auth.strategy = strategy;
    config.observability.metrics_enabled = false;
    config
}

/// Start the gateway with `config` on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let server = HttpServer::new(config).unwrap();
    let sessions = server.state().sessions.clone();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    Gateway {
        addr,
        sessions,
        shutdown,
    }
}

/// HTTP client that neither follows redirects nor uses system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
