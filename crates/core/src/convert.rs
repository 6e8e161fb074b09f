//! Conversions between typed widget fields and schema [`Value`]s.
//!
//! `from_value` is called on values that already passed descriptor
//! validation, so its errors only fire when a descriptor and its typed
//! field disagree.

use threeplot_protocol::{Color, ModelRef};
use threeplot_schema::{Record, SchemaError, ValidationError, Value};

pub trait ToValue {
    fn to_value(&self) -> Value;
}

pub trait FromValue: Sized {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError>;
}

pub(crate) fn wrong_type(field: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::WrongType {
        field: field.to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Field `key` of a record value, or a `WrongType` error naming the path.
pub(crate) fn field<'v>(
    parent: &str,
    value: &'v Value,
    key: &str,
) -> Result<(String, &'v Value), ValidationError> {
    let record = value
        .as_record()
        .ok_or_else(|| wrong_type(parent, "record", value))?;
    let path = format!("{parent}.{key}");
    match record.get(key) {
        Some(v) => Ok((path, v)),
        None => Err(ValidationError::UnknownField(path)),
    }
}

/// Decode field `key` of a record value.
pub(crate) fn decode<T: FromValue>(parent: &str, value: &Value, key: &str) -> Result<T, ValidationError> {
    let (path, v) = field(parent, value, key)?;
    T::from_value(&path, v)
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl FromValue for String {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| wrong_type(field, "string", value))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        value.as_f64().ok_or_else(|| wrong_type(field, "float", value))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        value.as_bool().ok_or_else(|| wrong_type(field, "bool", value))
    }
}

impl ToValue for Color {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl FromValue for Color {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        let s = value
            .as_str()
            .ok_or_else(|| wrong_type(field, "color string", value))?;
        Color::parse(s).map_err(|source| ValidationError::InvalidColor {
            field: field.to_string(),
            source,
        })
    }
}

impl ToValue for ModelRef {
    fn to_value(&self) -> Value {
        Value::Ref(self.clone())
    }
}

impl FromValue for ModelRef {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        value
            .as_model_ref()
            .cloned()
            .ok_or_else(|| wrong_type(field, "model reference", value))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Absent, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        if value.is_absent() {
            Ok(None)
        } else {
            T::from_value(field, value).map(Some)
        }
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        let items = value
            .as_sequence()
            .ok_or_else(|| wrong_type(field, "sequence", value))?;
        let decoded = items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_value(&format!("{field}[{i}]"), item))
            .collect::<Result<Vec<_>, _>>()?;
        decoded.try_into().map_err(|_| ValidationError::Shape {
            field: field.to_string(),
            source: SchemaError::ShapeMismatch {
                expected: N,
                found: items.len(),
            },
        })
    }
}

/// Collect `(name, value)` pairs into a record, in order.
pub(crate) fn record<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Record(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Record>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use threeplot_protocol::{ModelKind, RED};

    #[test]
    fn options_map_to_absent() {
        assert_eq!(None::<Color>.to_value(), Value::Absent);
        assert_eq!(Some(RED).to_value(), Value::from("red"));
        assert_eq!(Option::<f64>::from_value("w", &Value::Absent), Ok(None));
        assert_eq!(Option::<f64>::from_value("w", &Value::Float(2.0)), Ok(Some(2.0)));
    }

    #[test]
    fn arrays_check_length() {
        let two = Value::Sequence(vec![Value::Bool(true), Value::Bool(false)]);
        assert_eq!(<[bool; 2]>::from_value("axes", &two), Ok([true, false]));
        assert!(matches!(
            <[bool; 3]>::from_value("axes", &two),
            Err(ValidationError::Shape { .. })
        ));
    }

    #[test]
    fn references_roundtrip() {
        let scale = ModelRef::new("s", ModelKind::ContinuousScale);
        let slots = [Some(scale.clone()), None];
        assert_eq!(<[Option<ModelRef>; 2]>::from_value("scales", &slots.to_value()), Ok(slots));
    }

    #[test]
    fn missing_record_key_names_the_path() {
        let value = record([("a", Value::Float(1.0))]);
        assert_eq!(
            decode::<f64>("style", &value, "b"),
            Err(ValidationError::UnknownField("style.b".to_string()))
        );
        assert_eq!(decode::<f64>("style", &value, "a"), Ok(1.0));
    }
}
