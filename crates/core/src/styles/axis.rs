use serde::{Deserialize, Serialize};
use threeplot_protocol::Color;
use threeplot_schema::{Descriptor, RecordSchema, SchemaError, ValidationError, Value};

use crate::convert::{FromValue, ToValue, decode, record, wrong_type};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    #[default]
    Out,
}

impl TickDirection {
    pub const CHOICES: [&'static str; 2] = ["in", "out"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl ToValue for TickDirection {
    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl FromValue for TickDirection {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        match value.as_str() {
            Some("in") => Ok(Self::In),
            Some("out") => Ok(Self::Out),
            Some(other) => Err(ValidationError::InvalidChoice {
                field: field.to_string(),
                value: other.to_string(),
                choices: Self::CHOICES.map(String::from).to_vec(),
            }),
            None => Err(wrong_type(field, "string", value)),
        }
    }
}

/// Style of the minor or major ticks along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyle {
    pub label_format: String,
    pub label_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: Option<f64>,
    /// In scene units.
    pub tick_length: f64,
    pub direction: TickDirection,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            label_format: String::new(),
            label_color: None,
            line_color: None,
            line_width: None,
            tick_length: 0.1,
            direction: TickDirection::Out,
        }
    }
}

impl TickStyle {
    /// Half-length ticks between the major ones.
    pub fn minor() -> Self {
        Self {
            tick_length: 0.05,
            ..Self::default()
        }
    }

    pub fn major() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Result<RecordSchema, SchemaError> {
        RecordSchema::builder()
            .field("label_format", Descriptor::string(self.label_format.clone()))
            .field("label_color", Descriptor::optional_color(self.label_color.clone()))
            .field("line_color", Descriptor::optional_color(self.line_color.clone()))
            .field("line_width", Descriptor::optional_float(self.line_width))
            .field("tick_length", Descriptor::float(self.tick_length))
            .field(
                "direction",
                Descriptor::choice(TickDirection::CHOICES, self.direction.as_str()),
            )
            .build()
    }
}

impl ToValue for TickStyle {
    fn to_value(&self) -> Value {
        record([
            ("label_format", self.label_format.to_value()),
            ("label_color", self.label_color.to_value()),
            ("line_color", self.line_color.to_value()),
            ("line_width", self.line_width.to_value()),
            ("tick_length", self.tick_length.to_value()),
            ("direction", self.direction.to_value()),
        ])
    }
}

impl FromValue for TickStyle {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            label_format: decode(field, value, "label_format")?,
            label_color: decode(field, value, "label_color")?,
            line_color: decode(field, value, "line_color")?,
            line_width: decode(field, value, "line_width")?,
            tick_length: decode(field, value, "tick_length")?,
            direction: decode(field, value, "direction")?,
        })
    }
}

/// Style of one axis line of an axes cross, with its tick styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub label: String,
    pub line_color: Option<Color>,
    pub line_width: Option<f64>,
    pub minor_tick_format: TickStyle,
    pub major_tick_format: TickStyle,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            label: String::new(),
            line_color: None,
            line_width: None,
            minor_tick_format: TickStyle::minor(),
            major_tick_format: TickStyle::major(),
        }
    }
}

impl AxisStyle {
    pub fn new(label: impl Into<String>, line_color: Color) -> Self {
        Self {
            label: label.into(),
            line_color: Some(line_color),
            ..Self::default()
        }
    }

    pub fn schema(&self) -> Result<RecordSchema, SchemaError> {
        RecordSchema::builder()
            .field("label", Descriptor::string(self.label.clone()))
            .field("line_color", Descriptor::optional_color(self.line_color.clone()))
            .field("line_width", Descriptor::optional_float(self.line_width))
            .field("minor_tick_format", Descriptor::record(self.minor_tick_format.schema()?))
            .field("major_tick_format", Descriptor::record(self.major_tick_format.schema()?))
            .build()
    }
}

impl ToValue for AxisStyle {
    fn to_value(&self) -> Value {
        record([
            ("label", self.label.to_value()),
            ("line_color", self.line_color.to_value()),
            ("line_width", self.line_width.to_value()),
            ("minor_tick_format", self.minor_tick_format.to_value()),
            ("major_tick_format", self.major_tick_format.to_value()),
        ])
    }
}

impl FromValue for AxisStyle {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            label: decode(field, value, "label")?,
            line_color: decode(field, value, "line_color")?,
            line_width: decode(field, value, "line_width")?,
            minor_tick_format: decode(field, value, "minor_tick_format")?,
            major_tick_format: decode(field, value, "major_tick_format")?,
        })
    }
}
