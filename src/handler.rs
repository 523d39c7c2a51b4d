//! Request dispatcher.
//!
//! [`Dispatcher::handle`] turns one API Gateway event into one response. It
//! is the single boundary where store and input failures become status
//! codes: nothing it calls can make it fail or panic.

/// Request event model.
pub mod request;

/// Response model.
pub mod response;

use crate::{
    common::{
        attribute::{self, PlainRecord},
        key,
    },
    config::Config,
    error::{ApiError, StoreError},
    filter,
    gearbox::{self, GearboxRecord},
    store::ItemStore,
};

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use request::Request;
use response::Response;
use serde_json::{Map, Value, json};

/// Routes requests to the catalog operations of an [`ItemStore`].
///
/// ```rust
/// use gearbox_catalog::{config::Config, handler::Dispatcher, store::memory::MemoryStore};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let dispatcher = Dispatcher::new(MemoryStore::seeded().unwrap(), Config::default());
/// let response = dispatcher.handle(json!({"httpMethod": "GET"})).await;
/// assert_eq!(response.status_code, 200);
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: S,
    config: Config,
}

impl<S: ItemStore> Dispatcher<S> {
    /// Dispatcher over `store`.
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle a raw event; a missing or malformed event yields a 500.
    #[tracing::instrument(name = "gearbox_catalog.handle", skip_all, fields(table = %self.config.table_name))]
    pub async fn handle(&self, event: Value) -> Response {
        let response = match serde_json::from_value::<Request>(event) {
            Ok(request) => self
                .dispatch(&request)
                .await
                .unwrap_or_else(Response::from),
            Err(error) => {
                tracing::error!(%error, "malformed request event");
                ApiError::internal("Internal server error.").into()
            }
        };
        tracing::info!(status = response.status_code, "request handled");
        response
    }

    /// Route a parsed request.
    pub async fn dispatch(&self, request: &Request) -> Result<Response, ApiError> {
        let method = request.http_method.as_str();
        tracing::info!(method, "received request");
        if method != "GET" && method != "POST" {
            return Err(ApiError::MethodNotAllowed(request.http_method.clone()));
        }
        let body = request.json_body()?;
        if request.api_key().is_none() {
            tracing::info!(
                header = request::API_KEY_HEADER,
                "API key not provided, proceeding without authentication"
            );
        }
        if method == "GET" {
            self.list(request.query()).await
        } else {
            self.mutate(body).await
        }
    }

    async fn list(&self, query: Option<&IndexMap<String, String>>) -> Result<Response, ApiError> {
        let suffix = match query {
            Some(params) => {
                tracing::info!(?params, "fetching filtered items");
                let description: Vec<_> = params
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                format!(" (Filtered by: {})", description.join(", "))
            }
            None => {
                tracing::info!("fetching all items");
                " - All Items".to_string()
            }
        };
        let records = self.store.scan_all().await.map_err(|error| {
            tracing::error!(%error, "failed to scan catalog");
            ApiError::internal("Database operation failed")
        })?;
        let items: Vec<PlainRecord> = records.iter().map(attribute::convert_record).collect();
        let items = match query {
            Some(params) => filter::apply(items, params),
            None => items,
        };
        let total_items = items.len();
        let mut categories = Vec::new();
        let mut gearboxes = Vec::new();
        for item in items {
            let kind = item
                .get(key::PARTITION_KEY)
                .and_then(Value::as_str)
                .and_then(key::ItemKind::of_partition_key);
            match kind {
                Some(key::ItemKind::Category) => categories.push(item),
                Some(key::ItemKind::Gearbox) => gearboxes.push(item),
                None => {}
            }
        }
        let body = json!({
            "message": format!("Gearbox Catalog{suffix}"),
            "filters_applied": query,
            "summary": {
                "total_items": total_items,
                "categories": categories.len(),
                "gearbox_products": gearboxes.len(),
            },
            "categories": categories,
            "gearboxes": gearboxes,
        });
        Ok(Response::success(200, &body))
    }

    async fn mutate(&self, body: Value) -> Result<Response, ApiError> {
        let body = match body {
            Value::Object(body) if !body.is_empty() => body,
            Value::Object(_) | Value::Null => {
                return Err(ApiError::bad_request(
                    "Request body is required for POST operations",
                ));
            }
            _ => return Err(ApiError::bad_request("Request body must be a JSON object")),
        };
        let operation = match body.get("operation") {
            None => "create".to_string(),
            Some(Value::String(operation)) => operation.clone(),
            Some(other) => other.to_string(),
        };
        tracing::info!(%operation, "processing mutation");
        match operation.as_str() {
            "create" => self.create(&body).await,
            "update" => self.update(&body).await,
            "delete" => self.delete(&body).await,
            _ => Err(ApiError::bad_request(format!(
                "Unknown operation: {operation}"
            ))),
        }
    }

    async fn create(&self, body: &Map<String, Value>) -> Result<Response, ApiError> {
        let payload = match body.get("gearbox") {
            Some(Value::Object(payload)) => payload.clone(),
            _ => Map::new(),
        };
        let gearbox = GearboxRecord::from_payload(&payload, timestamp(body))?;
        let record = gearbox.to_record().map_err(|error| {
            tracing::error!(%error, "failed to serialize gearbox");
            ApiError::internal("Internal server error")
        })?;
        match self.store.create(record).await {
            Ok(()) => {
                tracing::info!(gearbox_id = %gearbox.gearbox_id, "gearbox created");
                let body = json!({
                    "message": "Gearbox created successfully",
                    "gearbox_id": gearbox.gearbox_id,
                });
                Ok(Response::success(201, &body))
            }
            Err(StoreError::AlreadyExists) => Err(ApiError::Conflict(
                "Gearbox with this ID already exists".to_string(),
            )),
            Err(error) => {
                tracing::error!(%error, "failed to create gearbox");
                Err(ApiError::internal("Failed to create gearbox"))
            }
        }
    }

    async fn update(&self, body: &Map<String, Value>) -> Result<Response, ApiError> {
        let gearbox_id = body
            .get(gearbox::GEARBOX_ID)
            .and_then(gearbox::text)
            .ok_or_else(|| ApiError::bad_request("gearbox_id is required for updates"))?;
        let updates = match body.get("updates") {
            Some(Value::Object(updates)) if !updates.is_empty() => updates,
            _ => return Err(ApiError::bad_request("No updates provided")),
        };
        let assignments = gearbox::update_assignments(updates, timestamp(body))
            .ok_or_else(|| ApiError::bad_request("No valid fields to update"))?;
        let keys = key::Keys::new(key::ItemKind::Gearbox, &gearbox_id);
        match self.store.update(&keys, assignments).await {
            Ok(()) => {
                tracing::info!(%gearbox_id, "gearbox updated");
                let updated_fields: Vec<_> = updates.keys().collect();
                let body = json!({
                    "message": "Gearbox updated successfully",
                    "gearbox_id": gearbox_id,
                    "updated_fields": updated_fields,
                });
                Ok(Response::success(200, &body))
            }
            Err(StoreError::NotFound) => Err(ApiError::NotFound("Gearbox not found".to_string())),
            Err(error) => {
                tracing::error!(%error, "failed to update gearbox");
                Err(ApiError::internal("Failed to update gearbox"))
            }
        }
    }

    async fn delete(&self, body: &Map<String, Value>) -> Result<Response, ApiError> {
        let gearbox_id = body
            .get(gearbox::GEARBOX_ID)
            .and_then(gearbox::text)
            .ok_or_else(|| ApiError::bad_request("gearbox_id is required for deletion"))?;
        let keys = key::Keys::new(key::ItemKind::Gearbox, &gearbox_id);
        match self.store.delete(&keys).await {
            Ok(()) => {
                tracing::info!(%gearbox_id, "gearbox deleted");
                let body = json!({
                    "message": "Gearbox deleted successfully",
                    "gearbox_id": gearbox_id,
                });
                Ok(Response::success(200, &body))
            }
            Err(StoreError::NotFound) => Err(ApiError::NotFound("Gearbox not found".to_string())),
            Err(error) => {
                tracing::error!(%error, "failed to delete gearbox");
                Err(ApiError::internal("Failed to delete gearbox"))
            }
        }
    }
}

/// Caller-supplied `timestamp`, or the current UTC time.
fn timestamp(body: &Map<String, Value>) -> String {
    body.get("timestamp")
        .and_then(Value::as_str)
        .filter(|timestamp| !timestamp.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}
