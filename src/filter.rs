//! Filter engine for catalog listings.
//!
//! Filters come from query parameters and are AND-combined: an item is kept
//! only if it satisfies every recognized filter. All comparisons are
//! case-insensitive; unrecognized parameters are ignored.

use crate::{
    common::{attribute::PlainRecord, key},
    gearbox,
};

use indexmap::IndexMap;
use serde_json::Value;

/// A single named predicate over catalog items.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Category items whose partition key contains the value, or gearboxes
    /// whose application type or gearbox type contains it.
    Category(String),
    /// Gearbox type equal to the value.
    Type(String),
    /// Manufacturer containing the value.
    Manufacturer(String),
    /// Price range equal to the value.
    PriceRange(String),
    /// Torque rating of at least the value.
    MinTorque(f64),
    /// Performance rating of at least the value.
    MinPerformance(f64),
}

impl Filter {
    /// Parse a query parameter.
    ///
    /// Returns `None` for unrecognized names, and for minimum filters whose
    /// value is not a number.
    ///
    /// ```rust
    /// use gearbox_catalog::filter::Filter;
    ///
    /// assert_eq!(Filter::parse("type", "Planetary"), Some(Filter::Type("planetary".to_string())));
    /// assert_eq!(Filter::parse("min_torque", "2000"), Some(Filter::MinTorque(2000.0)));
    /// assert_eq!(Filter::parse("min_torque", "lots"), None);
    /// assert_eq!(Filter::parse("color", "red"), None);
    /// ```
    pub fn parse(name: &str, value: &str) -> Option<Self> {
        let value = value.to_lowercase();
        let filter = match name {
            "category" => Self::Category(value),
            "type" => Self::Type(value),
            "manufacturer" => Self::Manufacturer(value),
            "price_range" => Self::PriceRange(value),
            "min_torque" => Self::MinTorque(parse_minimum(name, &value)?),
            "min_performance" => Self::MinPerformance(parse_minimum(name, &value)?),
            _ => return None,
        };
        Some(filter)
    }

    /// Whether `item` satisfies the filter.
    pub fn matches(&self, item: &PlainRecord) -> bool {
        match self {
            Self::Category(category) => {
                let partition_key = field_text(item, key::PARTITION_KEY);
                match key::ItemKind::of_partition_key(&partition_key) {
                    Some(key::ItemKind::Category) => partition_key.contains(category.as_str()),
                    Some(key::ItemKind::Gearbox) => {
                        field_text(item, gearbox::APPLICATION_TYPE).contains(category.as_str())
                            || field_text(item, gearbox::GEARBOX_TYPE).contains(category.as_str())
                    }
                    None => true,
                }
            }
            Self::Type(gearbox_type) => field_text(item, gearbox::GEARBOX_TYPE) == *gearbox_type,
            Self::Manufacturer(manufacturer) => {
                field_text(item, gearbox::MANUFACTURER).contains(manufacturer.as_str())
            }
            Self::PriceRange(price_range) => field_text(item, gearbox::PRICE_RANGE) == *price_range,
            // written as "not below" so that a NaN minimum excludes nothing
            Self::MinTorque(minimum) => !(field_number(item, gearbox::TORQUE_RATING) < *minimum),
            Self::MinPerformance(minimum) => {
                !(field_number(item, gearbox::PERFORMANCE_RATING) < *minimum)
            }
        }
    }
}

/// The recognized filters of a query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters(Vec<Filter>);

impl Filters {
    /// Recognized filters among `params`, in parameter order.
    pub fn from_params(params: &IndexMap<String, String>) -> Self {
        Self(
            params
                .iter()
                .filter_map(|(name, value)| Filter::parse(name, value))
                .collect(),
        )
    }

    /// Whether no filter applies.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `item` satisfies every filter.
    pub fn matches(&self, item: &PlainRecord) -> bool {
        self.0.iter().all(|filter| filter.matches(item))
    }

    /// Items satisfying every filter, in their original order.
    pub fn apply(&self, items: Vec<PlainRecord>) -> Vec<PlainRecord> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Items satisfying every filter recognized in `params`.
///
/// ```rust
/// use gearbox_catalog::filter;
/// use indexmap::IndexMap;
/// use serde_json::json;
///
/// let items = vec![
///     json!({"PK": "gearbox#GB-001", "gearbox_type": "planetary"}),
///     json!({"PK": "gearbox#GB-002", "gearbox_type": "helical"}),
/// ]
/// .into_iter()
/// .filter_map(|item| item.as_object().cloned())
/// .collect();
/// let params = IndexMap::from([("type".to_string(), "HELICAL".to_string())]);
/// let filtered = filter::apply(items, &params);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0]["PK"], "gearbox#GB-002");
/// ```
pub fn apply(items: Vec<PlainRecord>, params: &IndexMap<String, String>) -> Vec<PlainRecord> {
    Filters::from_params(params).apply(items)
}

fn parse_minimum(name: &str, value: &str) -> Option<f64> {
    match value.trim().parse() {
        Ok(minimum) => Some(minimum),
        Err(_) => {
            tracing::debug!(filter = name, value, "ignoring non-numeric minimum");
            None
        }
    }
}

/// Lowercased text of a field; empty when absent or not textual.
fn field_text(item: &PlainRecord, name: &str) -> String {
    match item.get(name) {
        Some(Value::String(text)) => text.to_lowercase(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Numeric value of a field; zero when absent or unparseable.
fn field_number(item: &PlainRecord, name: &str) -> f64 {
    match item.get(name) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}
