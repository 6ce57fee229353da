//! Average rating of a recipe, computed from every matching rating record.

use crate::http::error::ApiError;
use crate::records::{AggregateResult, RatingRecord};
use crate::upstream::{ListQuery, UpstreamClient};

pub const RATINGS_COLLECTION: &str = "ratings";

/// Recipe ids are interpolated into an upstream filter expression, so only
/// id-like characters are accepted.
pub fn validate_recipe_id(recipe_id: &str) -> Result<&str, ApiError> {
    let valid = !recipe_id.is_empty()
        && recipe_id.len() <= 64
        && recipe_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(recipe_id)
    } else {
        Err(ApiError::InputMalformed(format!("invalid recipe id '{recipe_id}'")))
    }
}

/// Fetch every rating of `recipe_id`, page by page, and average the scores.
///
/// Pages are requested one after another. A single unusable score fails the
/// whole computation.
pub async fn average_rating(
    upstream: &UpstreamClient,
    recipe_id: &str,
    page_size: u32,
) -> Result<AggregateResult, ApiError> {
    let filter = format!("recipeId='{recipe_id}'");
    let mut ratings = Vec::new();
    let mut page = 1u32;

    loop {
        let query = ListQuery {
            filter: Some(filter.clone()),
            page: Some(page),
            per_page: Some(page_size),
            ..Default::default()
        };
        let batch = upstream
            .list_records(RATINGS_COLLECTION, &query)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id, page, error = %e, "Failed to fetch ratings");
                ApiError::from_read(e)
            })?;

        for item in &batch.items {
            let rating = RatingRecord::try_from(item).map_err(|e| {
                tracing::error!(
                    recipe_id,
                    rating_id = ?item.get("id"),
                    error = %e,
                    "Unusable rating value"
                );
                ApiError::AggregationDataInvalid
            })?;
            ratings.push(rating);
        }

        let more = batch
            .total_pages()
            .is_some_and(|total| u64::from(page) < total);
        if !more || batch.items.is_empty() {
            break;
        }
        page += 1;
    }

    let result = AggregateResult::from_ratings(&ratings);
    tracing::debug!(
        recipe_id,
        ratings = ratings.len(),
        pages = page,
        average = result.average_rating,
        "Average rating computed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_id_validation() {
        assert!(validate_recipe_id("abc123").is_ok());
        assert!(validate_recipe_id("r_1-x").is_ok());
        assert!(validate_recipe_id("").is_err());
        assert!(validate_recipe_id("x' || recipeId!='").is_err());
        assert!(validate_recipe_id("a b").is_err());
        assert!(validate_recipe_id(&"a".repeat(65)).is_err());
    }
}
