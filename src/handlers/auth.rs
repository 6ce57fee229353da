//! Sign-up, sign-in and token verification endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::upstream::{NewUser, UpstreamError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Defaults to `password` when omitted.
    #[serde(default)]
    pub password_confirm: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default, alias = "identity")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub identity: String,
}

pub(crate) fn decode_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed JSON body");
        ApiError::InputMalformed(rejection.body_text())
    })
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        tracing::warn!(field, "Required field missing");
        return Err(ApiError::InputMalformed(format!("{field} is required")));
    }
    Ok(())
}

/// `POST /api/auth/sign-up`
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = decode_json(payload)?;
    require("email", &req.email)?;
    require("password", &req.password)?;

    let user = NewUser {
        password_confirm: req.password_confirm.unwrap_or_else(|| req.password.clone()),
        email: req.email,
        password: req.password,
    };

    state.upstream.create_user(&user).await.map_err(|e| {
        match &e {
            UpstreamError::Rejected(status) => {
                tracing::warn!(%status, "Upstream refused user creation")
            }
            _ => tracing::error!(error = %e, "User creation failed"),
        }
        ApiError::from(e)
    })?;

    tracing::info!("User created");
    Ok((StatusCode::CREATED, "User created successfully"))
}

/// `POST /api/auth/sign-in`
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let req = decode_json(payload)?;
    require("email", &req.email)?;
    require("password", &req.password)?;

    match state.upstream.auth_with_password(&req.email, &req.password).await {
        Ok(auth) => Ok(Json(TokenResponse { token: auth.token })),
        Err(UpstreamError::Rejected(status)) => {
            tracing::info!(%status, "Sign-in refused by upstream");
            Err(ApiError::Unauthenticated)
        }
        Err(e) => {
            tracing::error!(error = %e, "Sign-in failed");
            Err(e.into())
        }
    }
}

/// `GET /api/auth/verification`; only reachable through the auth gate.
pub async fn verification(Extension(identity): Extension<Identity>) -> Json<VerificationResponse> {
    Json(VerificationResponse {
        identity: identity.name,
    })
}
