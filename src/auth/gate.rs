//! Auth gate middleware.
//! Rejects protected requests that carry no resolvable identity.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::cookie;
use crate::config::AuthStrategy;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::session::SessionStore;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Identity attached to requests that passed the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub strategy: AuthStrategy,
}

pub async fn auth_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let strategy = state.config.auth.strategy;
    let resolved = match strategy {
        AuthStrategy::Cookie => resolve_cookie(&state.sessions, req.headers()),
        AuthStrategy::Bearer => resolve_bearer(&state.upstream, req.headers()).await,
    };

    match resolved {
        Ok(identity) => {
            tracing::debug!(identity = %identity.name, %strategy, "Request authenticated");
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => {
            if matches!(err, ApiError::Unauthenticated) {
                tracing::info!(path = %req.uri().path(), %strategy, "Rejected unauthenticated request");
                metrics::record_auth_rejection(match strategy {
                    AuthStrategy::Cookie => "cookie",
                    AuthStrategy::Bearer => "bearer",
                });
            }
            err.into_response()
        }
    }
}

fn resolve_cookie(sessions: &SessionStore, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let token = cookie::session_token(headers).ok_or(ApiError::Unauthenticated)?;
    let session = sessions.lookup(token).ok_or(ApiError::Unauthenticated)?;
    if session.identity.is_empty() {
        return Err(ApiError::Unauthenticated);
    }
    Ok(Identity {
        name: session.identity,
        strategy: AuthStrategy::Cookie,
    })
}

/// Token from `Authorization`, with or without a `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

async fn resolve_bearer(
    upstream: &UpstreamClient,
    headers: &HeaderMap,
) -> Result<Identity, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthenticated)?;
    match upstream.auth_refresh(token).await {
        Ok(resp) => Ok(Identity {
            name: resp.identity().unwrap_or_else(|| "anonymous".to_string()),
            strategy: AuthStrategy::Bearer,
        }),
        Err(UpstreamError::Rejected(status)) => {
            tracing::debug!(%status, "Upstream refused bearer token");
            Err(ApiError::Unauthenticated)
        }
        Err(e) => {
            tracing::error!(error = %e, "Bearer token verification failed");
            Err(e.into())
        }
    }
}
