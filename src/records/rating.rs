//! Rating records and score coercion.

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::records::page::Record;

/// Why a rating's `value` could not be turned into a score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("rating has no value field")]
    Missing,

    #[error("rating value {0} is not an integer")]
    NotInteger(Value),
}

/// A rating score as found on the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score<'a> {
    Numeric(&'a serde_json::Number),
    Textual(&'a str),
}

impl<'a> Score<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self, ScoreError> {
        match value {
            Value::Number(n) => Ok(Score::Numeric(n)),
            Value::String(s) => Ok(Score::Textual(s)),
            other => Err(ScoreError::NotInteger(other.clone())),
        }
    }

    /// Integral value of the score. Fractional numbers are rejected.
    pub fn to_integer(self) -> Option<i64> {
        match self {
            Score::Numeric(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Score::Textual(s) => s.parse::<i64>().ok(),
        }
    }
}

/// A rating whose score has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRecord {
    pub value: i64,
    pub recipe_id: Option<String>,
}

impl TryFrom<&Record> for RatingRecord {
    type Error = ScoreError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let raw = record.get("value").ok_or(ScoreError::Missing)?;
        let value = Score::from_value(raw)?
            .to_integer()
            .ok_or_else(|| ScoreError::NotInteger(raw.clone()))?;
        let recipe_id = record
            .get("recipeId")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Ok(Self { value, recipe_id })
    }
}

/// Average rating of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    #[serde(serialize_with = "whole_as_integer")]
    pub average_rating: f64,
}

/// Largest magnitude below which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write `4.0` as `4`; fractional values keep their decimals.
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl AggregateResult {
    /// Mean of all scores; exactly 0 when there are none.
    pub fn from_ratings(ratings: &[RatingRecord]) -> Self {
        if ratings.is_empty() {
            return Self { average_rating: 0.0 };
        }
        let sum: i128 = ratings.iter().map(|r| r.value as i128).sum();
        Self {
            average_rating: sum as f64 / ratings.len() as f64,
        }
    }
}
