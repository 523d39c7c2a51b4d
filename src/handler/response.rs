use crate::{error::ApiError, handler::request::API_KEY_HEADER};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

const CONTENT_TYPE: &str = "Content-Type";
const JSON: &str = "application/json";

/// API-Gateway-shaped response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: IndexMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

impl Response {
    /// Successful response with CORS headers.
    ///
    /// ```rust
    /// use gearbox_catalog::handler::response::Response;
    /// use serde_json::json;
    ///
    /// let response = Response::success(201, &json!({"gearbox_id": "GB-001"}));
    /// assert_eq!(response.status_code, 201);
    /// assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    /// assert_eq!(response.body, r#"{"gearbox_id":"GB-001"}"#);
    /// ```
    pub fn success(status_code: u16, body: &Value) -> Self {
        let headers = IndexMap::from([
            (CONTENT_TYPE.to_string(), JSON.to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Headers".to_string(),
                format!("Content-Type,Authorization,{API_KEY_HEADER}"),
            ),
        ]);
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    /// Error response carrying `{"error": message}`.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            headers: IndexMap::from([(CONTENT_TYPE.to_string(), JSON.to_string())]),
            body: json!({ "error": message }).to_string(),
        }
    }

    /// Parsed body, for inspection.
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

impl From<ApiError> for Response {
    fn from(error: ApiError) -> Self {
        Self::error(error.status_code(), &error.to_string())
    }
}
