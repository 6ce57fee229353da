//! Cookie login and logout (cookie strategy only).

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::auth::cookie;
use crate::handlers::auth::require;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::upstream::UpstreamError;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /auth`: check credentials upstream, start a session, set the cookie.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) = form.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed login form");
        ApiError::InputMalformed(rejection.body_text())
    })?;
    require("username", &form.username)?;
    require("password", &form.password)?;

    match state
        .upstream
        .auth_with_password(&form.username, &form.password)
        .await
    {
        Ok(_) => {}
        Err(UpstreamError::Rejected(status)) => {
            tracing::info!(%status, "Login refused by upstream");
            return Err(ApiError::Unauthenticated);
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            return Err(e.into());
        }
    }

    let token = state.sessions.create(form.username);
    tracing::info!(sessions = state.sessions.len(), "Session started");

    let auth = &state.config.auth;
    let set_cookie = cookie::issue(token.as_str(), state.sessions.ttl(), auth.secure_cookie);
    Ok((
        AppendHeaders([(header::SET_COOKIE, set_cookie)]),
        Redirect::to(&auth.login_redirect),
    )
        .into_response())
}

/// `POST /logout`: forget the server-side session and clear the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = cookie::session_token(&headers) {
        if state.sessions.delete(token) {
            tracing::info!(sessions = state.sessions.len(), "Session ended");
        }
    }
    (
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::clear(state.config.auth.secure_cookie),
        )]),
        "Logged out",
    )
}
