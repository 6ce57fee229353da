//! Request handlers.
//!
//! # Routes
//! ```text
//! public:    GET  /health
//!            POST /api/auth/sign-up
//!            POST /api/auth/sign-in
//!            POST /auth, POST /logout        (cookie strategy)
//! protected: GET  /api/auth/verification
//!            GET  /api/recipes
//!            GET  /api/ratings
//!            GET  /api/ratings/average/{recipe_id}
//! ```

pub mod auth;
pub mod collections;
pub mod ratings;
pub mod session;

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
