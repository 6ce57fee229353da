//! Handler error type and its HTTP mapping.
//!
//! Detail is logged where an error is detected; the client only sees the
//! status code and a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body not decodable or a required field missing.
    #[error("malformed input: {0}")]
    InputMalformed(String),

    /// Missing or invalid session, token or credentials.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Network failure talking to the record-store.
    #[error("upstream unreachable")]
    UpstreamUnreachable,

    /// Upstream refused the call; the status is mirrored to the client.
    #[error("upstream rejected request with status {0}")]
    UpstreamRejected(StatusCode),

    /// Upstream body did not decode into the expected shape.
    #[error("upstream response unparseable")]
    ResponseUnparseable,

    /// A rating value could not be coerced to an integer.
    #[error("rating data invalid")]
    AggregationDataInvalid,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InputMalformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamRejected(status) => *status,
            ApiError::UpstreamUnreachable
            | ApiError::ResponseUnparseable
            | ApiError::AggregationDataInvalid => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::InputMalformed(_) => "Invalid input",
            ApiError::Unauthenticated => "Unauthorized",
            ApiError::UpstreamUnreachable => "Record service unavailable",
            ApiError::UpstreamRejected(_) => "Record service rejected the request",
            ApiError::ResponseUnparseable => "Failed to parse record service response",
            ApiError::AggregationDataInvalid => "Invalid rating data",
        }
    }

    /// Map a failed collection read. Reads never mirror upstream statuses:
    /// any refusal is a server error from the client's point of view.
    pub fn from_read(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected(_) => {
                ApiError::UpstreamRejected(StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => other.into(),
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected(status) => ApiError::UpstreamRejected(status),
            UpstreamError::Unparseable(_) => ApiError::ResponseUnparseable,
            UpstreamError::InvalidUrl(_)
            | UpstreamError::Unreachable(_)
            | UpstreamError::Client(_) => ApiError::UpstreamUnreachable,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InputMalformed("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::UpstreamRejected(StatusCode::CONFLICT).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::AggregationDataInvalid.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_reads_do_not_mirror_status() {
        let err = ApiError::from_read(UpstreamError::Rejected(StatusCode::NOT_FOUND));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(UpstreamError::Rejected(StatusCode::NOT_FOUND));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_detail_not_leaked() {
        let err = ApiError::InputMalformed("expected `email` at line 1".into());
        assert_eq!(err.public_message(), "Invalid input");
    }
}
