//! `GET /api/ratings/average/{recipe_id}`

use axum::{
    extract::{Path, State},
    Json,
};

use crate::aggregate::{average_rating, validate_recipe_id};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::records::AggregateResult;

pub async fn average(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<AggregateResult>, ApiError> {
    let recipe_id = validate_recipe_id(&recipe_id).inspect_err(|_| {
        tracing::warn!(recipe_id = %recipe_id, "Rejected recipe id");
    })?;
    tracing::info!(recipe_id, "Fetching average rating");

    let page_size = state.config.collections.ratings_page_size;
    let result = average_rating(&state.upstream, recipe_id, page_size).await?;
    Ok(Json(result))
}
