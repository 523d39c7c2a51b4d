//! Catalog item layout: attribute names, record builders and update rules.

use crate::{
    common::{self, attribute, key},
    error::ApiError,
    write::update_item::Assignments,
};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Caller-supplied gearbox identifier.
pub const GEARBOX_ID: &str = "gearbox_id";
/// Model name of a gearbox.
pub const MODEL_NAME: &str = "model_name";
/// Manufacturer of a gearbox.
pub const MANUFACTURER: &str = "manufacturer";
/// Construction type of a gearbox, e.g. `planetary`.
pub const GEARBOX_TYPE: &str = "gearbox_type";
/// Torque rating of a gearbox.
pub const TORQUE_RATING: &str = "torque_rating";
/// Performance rating of a gearbox.
pub const PERFORMANCE_RATING: &str = "performance_rating";
/// Application a gearbox is meant for, e.g. `automotive`.
pub const APPLICATION_TYPE: &str = "application_type";
/// Price bracket of a gearbox.
pub const PRICE_RANGE: &str = "price_range";
/// Last update timestamp.
pub const UPDATED_AT: &str = "updated_at";

/// Fields a create payload must carry, in validation order.
pub const REQUIRED_FIELDS: [&str; 4] = [GEARBOX_ID, MODEL_NAME, MANUFACTURER, GEARBOX_TYPE];

/// Fields an update may never touch.
pub const PROTECTED_FIELDS: [&str; 3] = [key::PARTITION_KEY, key::SORT_KEY, GEARBOX_ID];

/// Stored layout of a gearbox.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GearboxRecord {
    /// `gearbox#<id>`.
    #[serde(rename = "PK")]
    pub partition_key: String,
    /// Always `metadata`.
    #[serde(rename = "SK")]
    pub sort_key: String,
    /// Identifier.
    pub gearbox_id: String,
    /// Model name.
    pub model_name: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Construction type.
    pub gearbox_type: String,
    /// Torque rating, stored with its JSON text by [`GearboxRecord::to_record`].
    #[serde(skip)]
    pub torque_rating: Option<Number>,
    /// Performance rating, stored like the torque rating.
    #[serde(skip)]
    pub performance_rating: Option<Number>,
    /// Application type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<String>,
    /// Price bracket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl GearboxRecord {
    /// Build a record from the `gearbox` object of a create request.
    ///
    /// Required fields are checked in [`REQUIRED_FIELDS`] order and must be
    /// non-empty; optional ratings must be numeric.
    pub fn from_payload(payload: &Map<String, Value>, created_at: String) -> Result<Self, ApiError> {
        let required = |name: &str| {
            payload
                .get(name)
                .and_then(text)
                .ok_or_else(|| ApiError::bad_request(format!("Missing required field: {name}")))
        };
        let gearbox_id = required(GEARBOX_ID)?;
        let model_name = required(MODEL_NAME)?;
        let manufacturer = required(MANUFACTURER)?;
        let gearbox_type = required(GEARBOX_TYPE)?;
        let keys = key::Keys::new(key::ItemKind::Gearbox, &gearbox_id);
        Ok(Self {
            partition_key: keys.partition_key,
            sort_key: keys.sort_key,
            gearbox_id,
            model_name,
            manufacturer,
            gearbox_type,
            torque_rating: optional_number(payload, TORQUE_RATING)?,
            performance_rating: optional_number(payload, PERFORMANCE_RATING)?,
            application_type: optional_text(payload, APPLICATION_TYPE),
            price_range: optional_text(payload, PRICE_RANGE),
            created_at,
        })
    }

    /// Tagged form of the record.
    ///
    /// Ratings keep their JSON text, so `90.0` is stored as `90.0`, not `90`.
    pub fn to_record(&self) -> Result<common::Record, serde_dynamo::Error> {
        let mut record: common::Record = serde_dynamo::to_item(self)?;
        let ratings = [
            (TORQUE_RATING, &self.torque_rating),
            (PERFORMANCE_RATING, &self.performance_rating),
        ];
        for (name, rating) in ratings {
            if let Some(rating) = rating {
                record.insert(name.to_string(), attribute::tag(&Value::Number(rating.clone())));
            }
        }
        Ok(record)
    }
}

/// Stored layout of a category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryRecord {
    /// `category#<name>`.
    #[serde(rename = "PK")]
    pub partition_key: String,
    /// Always `metadata`.
    #[serde(rename = "SK")]
    pub sort_key: String,
    /// Display name.
    pub category_name: String,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl CategoryRecord {
    /// Category stored under `category#<id>`.
    pub fn new(id: &str, category_name: &str, description: &str, created_at: &str) -> Self {
        let keys = key::Keys::new(key::ItemKind::Category, id);
        Self {
            partition_key: keys.partition_key,
            sort_key: keys.sort_key,
            category_name: category_name.to_string(),
            description: description.to_string(),
            created_at: created_at.to_string(),
        }
    }

    /// Tagged form of the record.
    pub fn to_record(&self) -> Result<common::Record, serde_dynamo::Error> {
        serde_dynamo::to_item(self)
    }
}

/// Identifier carried by a request field, if it is a non-empty string or a number.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn optional_text(payload: &Map<String, Value>, name: &str) -> Option<String> {
    match payload.get(name)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn optional_number(payload: &Map<String, Value>, name: &str) -> Result<Option<Number>, ApiError> {
    let number = match payload.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => Some(number.clone()),
        Some(Value::String(text)) => parse_number(text.trim()),
        Some(_) => None,
    };
    number
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid numeric value for field: {name}")))
}

fn parse_number(text: &str) -> Option<Number> {
    if text.contains('.') {
        text.parse::<f64>().ok().and_then(Number::from_f64)
    } else {
        text.parse::<i64>().ok().map(Number::from)
    }
}

/// Tagged value of an update field: numbers stay numeric, anything else is stored as text.
pub fn field_value(value: &Value) -> types::AttributeValue {
    match value {
        Value::Number(_) | Value::String(_) => attribute::tag(value),
        other => types::AttributeValue::S(other.to_string()),
    }
}

/// Assignments for an update request, in caller order.
///
/// Protected fields and any caller-supplied `updated_at` are dropped; `None`
/// when nothing else is left. The `updated_at` timestamp is appended last.
///
/// ```rust
/// use gearbox_catalog::gearbox;
/// use serde_json::json;
///
/// let updates = json!({"gearbox_id": "GB-009", "price_range": "low"});
/// let assignments = gearbox::update_assignments(
///     updates.as_object().unwrap(),
///     "2025-08-17T12:05:00Z".to_string(),
/// )
/// .unwrap();
/// assert_eq!(assignments.names(), vec!["price_range", "updated_at"]);
/// ```
pub fn update_assignments(updates: &Map<String, Value>, updated_at: String) -> Option<Assignments> {
    let mut assignments = Assignments(
        updates
            .iter()
            .filter(|(name, _)| {
                !PROTECTED_FIELDS.contains(&name.as_str()) && name.as_str() != UPDATED_AT
            })
            .map(|(name, value)| (name.clone(), field_value(value)))
            .collect(),
    );
    if assignments.is_empty() {
        return None;
    }
    assignments
        .0
        .push((UPDATED_AT.to_string(), types::AttributeValue::S(updated_at)));
    Some(assignments)
}

struct SampleGearbox {
    id: &'static str,
    model_name: &'static str,
    manufacturer: &'static str,
    gearbox_type: &'static str,
    torque_rating: i64,
    performance_rating: i64,
    application_type: &'static str,
    price_range: &'static str,
    created_at: &'static str,
}

impl From<&SampleGearbox> for GearboxRecord {
    fn from(sample: &SampleGearbox) -> Self {
        let keys = key::Keys::new(key::ItemKind::Gearbox, sample.id);
        Self {
            partition_key: keys.partition_key,
            sort_key: keys.sort_key,
            gearbox_id: sample.id.to_string(),
            model_name: sample.model_name.to_string(),
            manufacturer: sample.manufacturer.to_string(),
            gearbox_type: sample.gearbox_type.to_string(),
            torque_rating: Some(Number::from(sample.torque_rating)),
            performance_rating: Some(Number::from(sample.performance_rating)),
            application_type: Some(sample.application_type.to_string()),
            price_range: Some(sample.price_range.to_string()),
            created_at: sample.created_at.to_string(),
        }
    }
}

const SAMPLE_CATEGORIES: [(&str, &str, &str); 3] = [
    (
        "automotive",
        "Automotive Gearboxes",
        "Gearboxes for automotive applications",
    ),
    (
        "industrial",
        "Industrial Gearboxes",
        "Heavy-duty industrial gearboxes",
    ),
    (
        "marine",
        "Marine Gearboxes",
        "Gearboxes for marine applications",
    ),
];

const SAMPLE_GEARBOXES: [SampleGearbox; 5] = [
    SampleGearbox {
        id: "GB-001",
        model_name: "PowerMax 5000",
        manufacturer: "GearTech Industries",
        gearbox_type: "planetary",
        torque_rating: 5000,
        performance_rating: 92,
        application_type: "heavy_duty",
        price_range: "high",
        created_at: "2025-01-01T12:00:00Z",
    },
    SampleGearbox {
        id: "GB-002",
        model_name: "SpeedForce 3200",
        manufacturer: "VelocityGear Corp",
        gearbox_type: "helical",
        torque_rating: 3200,
        performance_rating: 88,
        application_type: "automotive",
        price_range: "medium",
        created_at: "2025-01-01T13:00:00Z",
    },
    SampleGearbox {
        id: "GB-003",
        model_name: "TurboShift 1500",
        manufacturer: "RapidMotion Ltd",
        gearbox_type: "worm",
        torque_rating: 1500,
        performance_rating: 85,
        application_type: "industrial",
        price_range: "low",
        created_at: "2025-01-01T14:00:00Z",
    },
    SampleGearbox {
        id: "GB-004",
        model_name: "OceanDrive 2800",
        manufacturer: "MarineGear Solutions",
        gearbox_type: "planetary",
        torque_rating: 2800,
        performance_rating: 90,
        application_type: "marine",
        price_range: "high",
        created_at: "2025-01-01T15:00:00Z",
    },
    SampleGearbox {
        id: "GB-005",
        model_name: "CompactForce 800",
        manufacturer: "MiniGear Inc",
        gearbox_type: "spur",
        torque_rating: 800,
        performance_rating: 82,
        application_type: "light_duty",
        price_range: "low",
        created_at: "2025-01-01T16:00:00Z",
    },
];

/// Records of the sample catalog used for local runs.
pub fn sample_catalog() -> Result<Vec<common::Record>, serde_dynamo::Error> {
    let mut records = Vec::with_capacity(SAMPLE_CATEGORIES.len() + SAMPLE_GEARBOXES.len());
    for (id, category_name, description) in SAMPLE_CATEGORIES {
        let category = CategoryRecord::new(id, category_name, description, "2025-01-01T10:00:00Z");
        records.push(category.to_record()?);
    }
    for sample in &SAMPLE_GEARBOXES {
        records.push(GearboxRecord::from(sample).to_record()?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_from_payload() {
        let payload = payload(json!({
            "gearbox_id": "GB-100",
            "model_name": "Test Drive 100",
            "manufacturer": "TestGear",
            "gearbox_type": "helical",
            "torque_rating": 1200,
            "performance_rating": "87.5",
            "application_type": "automotive",
        }));
        let record = GearboxRecord::from_payload(&payload, "2025-08-17T12:00:00Z".to_string())
            .unwrap();
        let tagged = record.to_record().unwrap();
        assert_eq!(
            tagged["PK"],
            types::AttributeValue::S("gearbox#GB-100".to_string())
        );
        assert_eq!(tagged["SK"], types::AttributeValue::S("metadata".to_string()));
        assert_eq!(
            tagged["torque_rating"],
            types::AttributeValue::N("1200".to_string())
        );
        assert_eq!(
            tagged["performance_rating"],
            types::AttributeValue::N("87.5".to_string())
        );
        assert_eq!(
            tagged["created_at"],
            types::AttributeValue::S("2025-08-17T12:00:00Z".to_string())
        );
        assert!(!tagged.contains_key("price_range"));
    }

    #[rstest]
    #[case::missing_id(json!({"model_name": "M", "manufacturer": "X", "gearbox_type": "spur"}), "Missing required field: gearbox_id")]
    #[case::missing_manufacturer(json!({"gearbox_id": "GB-1", "model_name": "M", "gearbox_type": "spur"}), "Missing required field: manufacturer")]
    #[case::empty_type(json!({"gearbox_id": "GB-1", "model_name": "M", "manufacturer": "X", "gearbox_type": ""}), "Missing required field: gearbox_type")]
    #[case::first_missing_wins(json!({"gearbox_id": "GB-1"}), "Missing required field: model_name")]
    #[case::bad_torque(json!({"gearbox_id": "GB-1", "model_name": "M", "manufacturer": "X", "gearbox_type": "spur", "torque_rating": "strong"}), "Invalid numeric value for field: torque_rating")]
    fn test_from_payload_rejects(#[case] value: Value, #[case] message: &str) {
        let error = GearboxRecord::from_payload(&payload(value), String::new()).unwrap_err();
        assert_eq!(error, ApiError::BadRequest(message.to_string()));
    }

    #[rstest]
    #[case::integer(json!(4500), types::AttributeValue::N("4500".to_string()))]
    #[case::float(json!(91.5), types::AttributeValue::N("91.5".to_string()))]
    #[case::string(json!("medium"), types::AttributeValue::S("medium".to_string()))]
    #[case::numeric_string(json!("4500"), types::AttributeValue::S("4500".to_string()))]
    #[case::boolean(json!(true), types::AttributeValue::S("true".to_string()))]
    fn test_field_value(#[case] value: Value, #[case] expected: types::AttributeValue) {
        assert_eq!(field_value(&value), expected);
    }

    #[rstest]
    #[case::keys_only(json!({"PK": "gearbox#x", "SK": "other", "gearbox_id": "x"}), None)]
    #[case::mixed(
        json!({"model_name": "PowerMax 5500", "PK": "gearbox#x", "torque_rating": 5500}),
        Some(vec!["model_name", "torque_rating", "updated_at"])
    )]
    #[case::timestamp_only(json!({"updated_at": "2020-01-01T00:00:00Z"}), None)]
    #[case::timestamp_assigned_once(
        json!({"updated_at": "2020-01-01T00:00:00Z", "price_range": "low"}),
        Some(vec!["price_range", "updated_at"])
    )]
    fn test_update_assignments(#[case] updates: Value, #[case] expected: Option<Vec<&str>>) {
        let assignments = update_assignments(&payload(updates), "now".to_string());
        assert_eq!(
            assignments.as_ref().map(Assignments::names),
            expected
        );
    }

    #[test]
    fn test_whole_float_rating_keeps_its_decimal_point() {
        let payload = payload(json!({
            "gearbox_id": "GB-101",
            "model_name": "Test Drive 101",
            "manufacturer": "TestGear",
            "gearbox_type": "spur",
            "torque_rating": 1500,
            "performance_rating": 90.0,
        }));
        let record = GearboxRecord::from_payload(&payload, String::new()).unwrap();
        let tagged = record.to_record().unwrap();
        assert_eq!(
            tagged["performance_rating"],
            types::AttributeValue::N("90.0".to_string())
        );
        assert_eq!(
            tagged["torque_rating"],
            types::AttributeValue::N("1500".to_string())
        );
        let plain = attribute::convert_record(&tagged);
        assert_eq!(plain["performance_rating"], json!(90.0));
        assert_eq!(plain["torque_rating"], json!(1500));
    }

    #[test]
    fn test_sample_catalog() {
        let records = sample_catalog().unwrap();
        let kinds: Vec<_> = records
            .iter()
            .filter_map(key::Keys::of_record)
            .filter_map(|keys| key::ItemKind::of_partition_key(&keys.partition_key))
            .collect();
        assert_eq!(kinds.len(), 8);
        assert_eq!(
            kinds
                .iter()
                .filter(|kind| **kind == key::ItemKind::Category)
                .count(),
            3
        );
    }
}
