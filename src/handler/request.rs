use crate::error::ApiError;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

fn default_method() -> String {
    "GET".to_string()
}

/// API-Gateway-shaped request event.
///
/// ```rust
/// use gearbox_catalog::handler::request::Request;
/// use serde_json::json;
///
/// let request: Request = serde_json::from_value(json!({
///     "httpMethod": "POST",
///     "headers": {"x-api-key": "secret"},
///     "body": "{\"operation\": \"delete\", \"gearbox_id\": \"GB-001\"}",
///     "queryStringParameters": null,
/// }))
/// .unwrap();
/// assert_eq!(request.http_method, "POST");
/// assert_eq!(request.api_key(), Some("secret"));
/// assert_eq!(request.json_body().unwrap()["operation"], "delete");
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// HTTP method; `GET` when absent.
    #[serde(default = "default_method")]
    pub http_method: String,
    /// Request headers, looked up case-sensitively.
    #[serde(default)]
    pub headers: Option<IndexMap<String, String>>,
    /// Raw body: a JSON string, an already-parsed value, or nothing.
    #[serde(default)]
    pub body: Option<Value>,
    /// Query parameters, in the order they were supplied.
    #[serde(default)]
    pub query_string_parameters: Option<IndexMap<String, String>>,
}

impl Request {
    /// Non-blank API key, if one was sent.
    pub fn api_key(&self) -> Option<&str> {
        self.headers
            .as_ref()?
            .get(API_KEY_HEADER)
            .map(String::as_str)
            .filter(|api_key| !api_key.trim().is_empty())
    }

    /// Query parameters; `None` when absent or empty.
    pub fn query(&self) -> Option<&IndexMap<String, String>> {
        self.query_string_parameters
            .as_ref()
            .filter(|params| !params.is_empty())
    }

    /// Parsed body.
    ///
    /// A string body must hold valid JSON (the empty string does not); a
    /// structured body is used as-is; a missing body is an empty object.
    pub fn json_body(&self) -> Result<Value, ApiError> {
        match &self.body {
            None | Some(Value::Null) => Ok(Value::Object(Map::new())),
            Some(Value::String(raw)) => serde_json::from_str(raw).map_err(|error| {
                tracing::error!(%error, "invalid JSON in request body");
                ApiError::bad_request("Invalid JSON in request body.")
            }),
            Some(value) => Ok(value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::absent(json!({}), Ok(json!({})))]
    #[case::null(json!({"body": null}), Ok(json!({})))]
    #[case::string(json!({"body": "{\"a\": 1}"}), Ok(json!({"a": 1})))]
    #[case::structured(json!({"body": {"a": [1, 2]}}), Ok(json!({"a": [1, 2]})))]
    #[case::empty_string(json!({"body": ""}), Err(ApiError::BadRequest("Invalid JSON in request body.".to_string())))]
    #[case::invalid_string(json!({"body": "{not json"}), Err(ApiError::BadRequest("Invalid JSON in request body.".to_string())))]
    fn test_json_body(#[case] event: Value, #[case] expected: Result<Value, ApiError>) {
        let request: Request = serde_json::from_value(event).unwrap();
        assert_eq!(request.json_body(), expected);
    }

    #[rstest]
    #[case::present(json!({"headers": {"x-api-key": "k"}}), Some("k"))]
    #[case::blank(json!({"headers": {"x-api-key": "   "}}), None)]
    #[case::case_sensitive(json!({"headers": {"X-Api-Key": "k"}}), None)]
    #[case::no_headers(json!({"headers": null}), None)]
    fn test_api_key(#[case] event: Value, #[case] expected: Option<&str>) {
        let request: Request = serde_json::from_value(event).unwrap();
        assert_eq!(request.api_key(), expected);
    }

    #[test]
    fn test_defaults() {
        let request: Request = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.http_method, "GET");
        assert_eq!(request.query(), None);
    }

    #[test]
    fn test_query_keeps_order() {
        let request: Request = serde_json::from_value(json!({
            "queryStringParameters": {"type": "planetary", "category": "marine", "min_torque": "100"},
        }))
        .unwrap();
        let names: Vec<_> = request.query().unwrap().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["type", "category", "min_torque"]);
    }

    #[test]
    fn test_null_event_is_rejected() {
        assert!(serde_json::from_value::<Request>(Value::Null).is_err());
    }
}
