//! Sanitized collection proxies: `/api/recipes` and `/api/ratings`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::records::{Page, Record};
use crate::upstream::ListQuery;

/// Query parameters a client may pass through to the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub expand: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_recipes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<Record>>, ApiError> {
    let default_expand = state.config.collections.recipes_expand.clone();
    proxy_collection(&state, "recipes", default_expand, params).await
}

pub async fn list_ratings(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<Record>>, ApiError> {
    let default_expand = state.config.collections.ratings_expand.clone();
    proxy_collection(&state, "ratings", default_expand, params).await
}

async fn proxy_collection(
    state: &AppState,
    collection: &'static str,
    default_expand: Option<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<Record>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!(collection, error = %rejection.body_text(), "Rejected list parameters");
        ApiError::InputMalformed(rejection.body_text())
    })?;

    let query = ListQuery {
        expand: params.expand.or(default_expand),
        sort: params.sort,
        page: params.page,
        per_page: params.per_page,
        filter: None,
    };

    let page = state
        .upstream
        .list_records(collection, &query)
        .await
        .map_err(|e| {
            tracing::error!(collection, error = %e, "Failed to fetch collection");
            ApiError::from_read(e)
        })?
        .sanitized();

    tracing::debug!(collection, items = page.items.len(), "Collection proxied");
    Ok(Json(page))
}
