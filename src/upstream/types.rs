//! Request/response bodies and error definitions for the record-store API.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while talking to the record-store.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Endpoint URL could not be built from the configured base.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection, timeout or body read failure.
    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Upstream answered with a status other than the expected one.
    #[error("upstream rejected request with status {0}")]
    Rejected(StatusCode),

    /// Upstream answered successfully but the body did not have the expected shape.
    #[error("upstream response unparseable: {0}")]
    Unparseable(#[source] serde_json::Error),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Body of `POST /api/collections/users/records`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Body of `POST /api/collections/users/auth-with-password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordCredentials<'a> {
    pub identity: &'a str,
    pub password: &'a str,
}

/// Successful authentication response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,

    #[serde(default)]
    pub record: Option<Map<String, Value>>,
}

impl AuthResponse {
    /// Best human-readable identity of the authenticated user record.
    pub fn identity(&self) -> Option<String> {
        let record = self.record.as_ref()?;
        ["email", "username", "id"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

/// Query parameters for a collection list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub expand: Option<String>,
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(expand) = &self.expand {
            pairs.push(("expand", expand.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("perPage", per_page.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_wire_names() {
        let body = serde_json::to_value(NewUser {
            email: "a@b.c".into(),
            password: "pw".into(),
            password_confirm: "pw".into(),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"email": "a@b.c", "password": "pw", "passwordConfirm": "pw"})
        );
    }

    #[test]
    fn test_auth_response_identity() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "token": "t",
            "record": {"id": "u1", "email": "cook@example.com"}
        }))
        .unwrap();
        assert_eq!(resp.identity().as_deref(), Some("cook@example.com"));

        let resp: AuthResponse = serde_json::from_value(json!({"token": "t"})).unwrap();
        assert_eq!(resp.identity(), None);
    }

    #[test]
    fn test_auth_response_requires_token() {
        assert!(serde_json::from_value::<AuthResponse>(json!({"record": {}})).is_err());
        assert!(serde_json::from_value::<AuthResponse>(json!({"token": 42})).is_err());
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery {
            expand: Some("user".into()),
            filter: Some("recipeId='r1'".into()),
            page: Some(2),
            per_page: Some(50),
            ..Default::default()
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("expand", "user".to_string()),
                ("filter", "recipeId='r1'".to_string()),
                ("page", "2".to_string()),
                ("perPage", "50".to_string()),
            ]
        );
        assert!(ListQuery::default().pairs().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = UpstreamError::Rejected(StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "upstream rejected request with status 404 Not Found"
        );
    }
}
