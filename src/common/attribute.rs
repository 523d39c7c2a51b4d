use crate::common;

use aws_sdk_dynamodb::{primitives::Blob, types};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Map, Number, Value, json};

/// A stored item with every type tag unwrapped.
pub type PlainRecord = Map<String, Value>;

/// Unwrap the type tag of an attribute value, recursively.
///
/// Numbers become integers unless their textual form contains a decimal
/// point; binary values are rendered as base64 strings.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use gearbox_catalog::common::attribute;
/// use serde_json::json;
///
/// assert_eq!(attribute::convert(&AttributeValue::N("5000".to_string())), json!(5000));
/// assert_eq!(attribute::convert(&AttributeValue::N("92.5".to_string())), json!(92.5));
/// ```
pub fn convert(value: &types::AttributeValue) -> Value {
    match value {
        types::AttributeValue::S(text) => Value::String(text.clone()),
        types::AttributeValue::N(number) => parse_number(number),
        types::AttributeValue::Bool(flag) => Value::Bool(*flag),
        types::AttributeValue::Null(_) => Value::Null,
        types::AttributeValue::L(values) => Value::Array(values.iter().map(convert).collect()),
        types::AttributeValue::M(map) => Value::Object(convert_map(map)),
        types::AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        types::AttributeValue::Ns(values) => {
            Value::Array(values.iter().map(|number| parse_number(number)).collect())
        }
        types::AttributeValue::Bs(values) => Value::Array(values.iter().map(encode_blob).collect()),
        // not unwrapped: keep the tagged form
        types::AttributeValue::B(blob) => json!({ "B": encode_blob(blob) }),
        // no payload to carry over
        _ => json!({ "Unknown": null }),
    }
}

/// Wrap a plain value in its type tag, recursively.
///
/// Numbers keep their JSON text, so a float stays a float once unwrapped.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use gearbox_catalog::common::attribute;
/// use serde_json::json;
///
/// assert_eq!(attribute::tag(&json!(90.0)), AttributeValue::N("90.0".to_string()));
/// assert_eq!(attribute::convert(&attribute::tag(&json!(90.0))), json!(90.0));
/// ```
pub fn tag(value: &Value) -> types::AttributeValue {
    match value {
        Value::Null => types::AttributeValue::Null(true),
        Value::Bool(flag) => types::AttributeValue::Bool(*flag),
        Value::Number(number) => types::AttributeValue::N(number.to_string()),
        Value::String(text) => types::AttributeValue::S(text.clone()),
        Value::Array(values) => types::AttributeValue::L(values.iter().map(tag).collect()),
        Value::Object(map) => types::AttributeValue::M(
            map.iter()
                .map(|(name, value)| (name.clone(), tag(value)))
                .collect(),
        ),
    }
}

/// Unwrap every attribute of a stored record.
///
/// Attributes are emitted sorted by name so that responses are stable.
pub fn convert_record(record: &common::Record) -> PlainRecord {
    convert_map(record)
}

fn convert_map(map: &common::Record) -> PlainRecord {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
    entries
        .into_iter()
        .map(|(name, value)| (name.clone(), convert(value)))
        .collect()
}

fn parse_number(number: &str) -> Value {
    let parsed = if number.contains('.') {
        number.parse::<f64>().ok().and_then(Number::from_f64)
    } else {
        number
            .parse::<i64>()
            .map(Number::from)
            .or_else(|_| number.parse::<u64>().map(Number::from))
            .ok()
            .or_else(|| number.parse::<f64>().ok().and_then(Number::from_f64))
    };
    match parsed {
        Some(number) => Value::Number(number),
        None => Value::String(number.to_string()),
    }
}

fn encode_blob(blob: &Blob) -> Value {
    Value::String(STANDARD.encode(blob.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::string(json!("planetary"))]
    #[case::integer(json!(5000))]
    #[case::negative_integer(json!(-12))]
    #[case::float(json!(92.5))]
    #[case::whole_float(json!(2.0))]
    #[case::boolean(json!(true))]
    #[case::null(Value::Null)]
    #[case::list(json!(["a", 1, 2.5, false, null]))]
    #[case::map(json!({"ratio": 3.75, "stages": 2, "name": "reducer"}))]
    #[case::nested(json!({"specs": {"ratios": [1, 2.5], "tags": {"sealed": true}}}))]
    fn test_convert_round_trip(#[case] value: Value) {
        assert_eq!(convert(&tag(&value)), value);
    }

    #[rstest]
    #[case::string_set(
        types::AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
        json!(["a", "b"])
    )]
    #[case::number_set(
        types::AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]),
        json!([1, 2.5])
    )]
    #[case::binary_set(
        types::AttributeValue::Bs(vec![Blob::new("hi")]),
        json!(["aGk="])
    )]
    #[case::binary(
        types::AttributeValue::B(Blob::new("hi")),
        json!({"B": "aGk="})
    )]
    #[case::exponent(
        types::AttributeValue::N("1e3".to_string()),
        json!(1000.0)
    )]
    #[case::unparseable_number(
        types::AttributeValue::N("abc".to_string()),
        json!("abc")
    )]
    #[case::null(types::AttributeValue::Null(true), Value::Null)]
    #[case::unknown(types::AttributeValue::Unknown, json!({"Unknown": null}))]
    fn test_convert(#[case] value: types::AttributeValue, #[case] expected: Value) {
        assert_eq!(convert(&value), expected);
    }

    #[test]
    fn test_convert_record_sorts_attributes() {
        let record = common::Record::from([
            (
                "SK".to_string(),
                types::AttributeValue::S("metadata".to_string()),
            ),
            (
                "PK".to_string(),
                types::AttributeValue::S("gearbox#GB-001".to_string()),
            ),
            (
                "torque_rating".to_string(),
                types::AttributeValue::N("5000".to_string()),
            ),
        ]);
        let actual = convert_record(&record);
        let names: Vec<_> = actual.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["PK", "SK", "torque_rating"]);
        assert_eq!(actual["torque_rating"], json!(5000));
    }
}
