use indexmap::IndexMap;
use serde::Serialize;
use threeplot_protocol::{Color, ModelRef};

/// A record value: field name to value, in declaration order.
pub type Record = IndexMap<String, Value>;

/// A dynamically shaped field value, as produced by schema defaults and
/// accepted by descriptor validation.
///
/// Serializes to the JSON the frontend expects: `Absent` is `null`, records
/// are objects (in field order), sequences are arrays and model references
/// are `"IPY_MODEL_<id>"` strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Absent,
    Bool(bool),
    Float(f64),
    Str(String),
    Ref(ModelRef),
    Record(Record),
    Sequence(Vec<Value>),
}

impl Value {
    /// Type name used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Ref(_) => "model reference",
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_model_ref(&self) -> Option<&ModelRef> {
        match self {
            Self::Ref(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a record field; `None` for non-records and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|r| r.get(key))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Self::Str(c.into())
    }
}

impl From<ModelRef> for Value {
    fn from(r: ModelRef) -> Self {
        Self::Ref(r)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Absent, Into::into)
    }
}

/// Build a [`Record`] value from `key => value` pairs.
///
/// ```
/// use threeplot_schema::{record, Value};
/// let style = record! { "line_color" => "#d9d9d9", "line_width" => 1.0 };
/// assert_eq!(style.get("line_width"), Some(&Value::Float(1.0)));
/// ```
#[macro_export]
macro_rules! record {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut record = $crate::Record::new();
        $(record.insert(::std::string::String::from($key), $crate::Value::from($value));)*
        $crate::Value::Record(record)
    }};
}
