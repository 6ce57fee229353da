//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Put protected routes behind the auth gate
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener and run until shutdown
//! - Own the background session sweeper

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::auth_gate;
use crate::config::{AuthStrategy, GatewayConfig};
use crate::handlers::{self, auth, collections, ratings, session};
use crate::http::request::make_request_span;
use crate::observability::metrics;
use crate::session::{SessionStore, SessionSweeper};
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: UpstreamClient,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let sessions = SessionStore::new(Duration::from_secs(config.auth.session_ttl_secs));
        Ok(Self {
            config: Arc::new(config),
            upstream,
            sessions,
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> UpstreamResult<Self> {
        Ok(Self::with_state(AppState::new(config)?))
    }

    /// Create a server around existing state (shared session store, client).
    pub fn with_state(state: AppState) -> Self {
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        let protected = Router::new()
            .route("/api/auth/verification", get(auth::verification))
            .route("/api/recipes", get(collections::list_recipes))
            .route("/api/ratings", get(collections::list_ratings))
            .route("/api/ratings/average/{recipe_id}", get(ratings::average))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_gate));

        let mut public = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/auth/sign-up", post(auth::sign_up))
            .route("/api/auth/sign-in", post(auth::sign_in));

        if config.auth.strategy == AuthStrategy::Cookie {
            public = public
                .route("/auth", post(session::login))
                .route("/logout", post(session::logout));
        }

        public
            .merge(protected)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn(track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let config = &self.state.config;
        tracing::info!(
            address = %addr,
            strategy = %config.auth.strategy,
            upstream = %self.state.upstream.base_url(),
            "HTTP server starting"
        );

        if config.auth.strategy == AuthStrategy::Cookie {
            let sweeper = SessionSweeper::new(
                self.state.sessions.clone(),
                Duration::from_secs(config.auth.sweep_interval_secs),
            );
            tokio::spawn(sweeper.run(shutdown.resubscribe()));
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared state, e.g. to inspect the session store.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.state.config
    }
}

/// Count responses per matched route.
async fn track_requests(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let response = next.run(req).await;
    metrics::record_request(&route, response.status().as_u16());
    response
}
