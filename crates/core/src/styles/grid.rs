use serde::{Deserialize, Serialize};
use threeplot_protocol::{Color, LIGHT_GRAY, MID_GRAY};
use threeplot_schema::{Descriptor, RecordSchema, SchemaError, ValidationError, Value};

use crate::convert::{FromValue, ToValue, decode, record};

/// Style of one family of gridlines (the minor or the major ones).
///
/// `None` color/width means "inherit from the grid, then the widget".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridlineStyle {
    pub label_format: String,
    pub line_color: Option<Color>,
    pub line_width: Option<f64>,
}

impl GridlineStyle {
    /// Thin light lines between the labelled ones.
    pub fn minor() -> Self {
        Self {
            line_color: Some(LIGHT_GRAY),
            line_width: Some(1.0),
            ..Self::default()
        }
    }

    pub fn major() -> Self {
        Self {
            line_color: Some(MID_GRAY),
            line_width: Some(2.0),
            ..Self::default()
        }
    }

    /// Schema whose defaults are this style's values.
    pub fn schema(&self) -> Result<RecordSchema, SchemaError> {
        RecordSchema::builder()
            .field("label_format", Descriptor::string(self.label_format.clone()))
            .field("line_color", Descriptor::optional_color(self.line_color.clone()))
            .field("line_width", Descriptor::optional_float(self.line_width))
            .build()
    }
}

impl ToValue for GridlineStyle {
    fn to_value(&self) -> Value {
        record([
            ("label_format", self.label_format.to_value()),
            ("line_color", self.line_color.to_value()),
            ("line_width", self.line_width.to_value()),
        ])
    }
}

impl FromValue for GridlineStyle {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            label_format: decode(field, value, "label_format")?,
            line_color: decode(field, value, "line_color")?,
            line_width: decode(field, value, "line_width")?,
        })
    }
}

/// Style of one planar grid: its own line overrides, the minor and major
/// gridline styles, and a label.
///
/// Deserializing a partial object fills missing fields from
/// [`GridStyle::default`]. A nested style that is given replaces the whole
/// nested default: `{"minor_style": {"line_color": "red"}}` leaves the
/// minor width unset rather than 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub line_color: Option<Color>,
    pub line_width: Option<f64>,
    pub minor_style: GridlineStyle,
    pub major_style: GridlineStyle,
    pub label: String,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            line_color: None,
            line_width: None,
            minor_style: GridlineStyle::minor(),
            major_style: GridlineStyle::major(),
            label: String::new(),
        }
    }
}

impl GridStyle {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn schema(&self) -> Result<RecordSchema, SchemaError> {
        RecordSchema::builder()
            .field("line_color", Descriptor::optional_color(self.line_color.clone()))
            .field("line_width", Descriptor::optional_float(self.line_width))
            .field("minor_style", Descriptor::record(self.minor_style.schema()?))
            .field("major_style", Descriptor::record(self.major_style.schema()?))
            .field("label", Descriptor::string(self.label.clone()))
            .build()
    }

    /// Effective minor and major line styles under a widget-level `parent`.
    ///
    /// A nested gridline color or width wins over the grid-level one, which
    /// wins over the parent. With no nested overrides both families share
    /// the grid-level (or parent) style.
    pub fn resolve_lines(&self, parent: &LineStyle) -> GridLines {
        let resolve = |nested: &GridlineStyle| LineStyle {
            color: nested
                .line_color
                .as_ref()
                .or(self.line_color.as_ref())
                .unwrap_or(&parent.color)
                .clone(),
            width: nested.line_width.or(self.line_width).unwrap_or(parent.width),
        };
        GridLines {
            minor: resolve(&self.minor_style),
            major: resolve(&self.major_style),
        }
    }
}

impl ToValue for GridStyle {
    fn to_value(&self) -> Value {
        record([
            ("line_color", self.line_color.to_value()),
            ("line_width", self.line_width.to_value()),
            ("minor_style", self.minor_style.to_value()),
            ("major_style", self.major_style.to_value()),
            ("label", self.label.to_value()),
        ])
    }
}

impl FromValue for GridStyle {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            line_color: decode(field, value, "line_color")?,
            line_width: decode(field, value, "line_width")?,
            minor_style: decode(field, value, "minor_style")?,
            major_style: decode(field, value, "major_style")?,
            label: decode(field, value, "label")?,
        })
    }
}

/// A concrete line material: what the renderer finally draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    pub minor: LineStyle,
    pub major: LineStyle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use threeplot_protocol::{BLACK, RED};
    use threeplot_schema::record;

    #[test]
    fn gridline_default_is_all_unset() {
        let schema = GridlineStyle::default().schema().unwrap();
        assert_eq!(
            schema.default_value(),
            record! { "label_format" => "", "line_color" => Value::Absent, "line_width" => Value::Absent }
        );
    }

    #[test]
    fn grid_default_nests_minor_and_major() {
        let schema = GridStyle::default().schema().unwrap();
        assert_eq!(
            schema.default_value(),
            record! {
                "line_color" => Value::Absent,
                "line_width" => Value::Absent,
                "minor_style" => record! { "label_format" => "", "line_color" => "#d9d9d9", "line_width" => 1.0 },
                "major_style" => record! { "label_format" => "", "line_color" => "#a6a6a6", "line_width" => 2.0 },
                "label" => "",
            }
        );
    }

    #[test]
    fn schema_default_matches_typed_value() {
        let style = GridStyle {
            line_width: Some(3.0),
            minor_style: GridlineStyle {
                label_format: ".1f".into(),
                ..GridlineStyle::default()
            },
            ..GridStyle::labeled("XY")
        };
        assert_eq!(style.schema().unwrap().default_value(), style.to_value());
        assert_eq!(GridStyle::from_value("g", &style.to_value()), Ok(style));
    }

    #[test]
    fn partial_json_replaces_nested_style_wholesale() {
        let style: GridStyle =
            serde_json::from_str(r#"{"label": "XZ", "minor_style": {"line_color": "red"}}"#).unwrap();
        assert_eq!(style.label, "XZ");
        assert_eq!(style.minor_style.line_color, Some(RED));
        assert_eq!(style.minor_style.line_width, None);
        assert_eq!(style.major_style, GridlineStyle::major());
    }

    #[test]
    fn json_with_bad_color_is_rejected() {
        assert!(serde_json::from_str::<GridStyle>(r#"{"line_color": "nope"}"#).is_err());
    }

    #[test]
    fn default_lines_come_from_nested_styles() {
        let parent = LineStyle { color: BLACK, width: 1.0 };
        let lines = GridStyle::default().resolve_lines(&parent);
        assert_eq!(lines.minor, LineStyle { color: LIGHT_GRAY, width: 1.0 });
        assert_eq!(lines.major, LineStyle { color: MID_GRAY, width: 2.0 });
    }

    #[test]
    fn nested_style_wins_over_grid_override() {
        let parent = LineStyle { color: BLACK, width: 1.0 };
        let style = GridStyle {
            line_color: Some(RED),
            line_width: Some(5.0),
            ..GridStyle::default()
        };
        let lines = style.resolve_lines(&parent);
        assert_eq!(lines.minor, LineStyle { color: LIGHT_GRAY, width: 1.0 });
        assert_eq!(lines.major, LineStyle { color: MID_GRAY, width: 2.0 });
    }

    #[test]
    fn grid_override_fills_unset_nested_values() {
        let parent = LineStyle { color: BLACK, width: 1.0 };
        let style = GridStyle {
            line_color: Some(RED),
            line_width: Some(5.0),
            minor_style: GridlineStyle {
                line_width: Some(0.5),
                ..GridlineStyle::default()
            },
            ..GridStyle::default()
        };
        let lines = style.resolve_lines(&parent);
        assert_eq!(lines.minor, LineStyle { color: RED, width: 0.5 });
        assert_eq!(lines.major, LineStyle { color: MID_GRAY, width: 2.0 });
    }

    #[test]
    fn bare_grid_override_is_shared() {
        let parent = LineStyle { color: BLACK, width: 1.0 };
        let style = GridStyle {
            line_color: Some(RED),
            minor_style: GridlineStyle::default(),
            major_style: GridlineStyle::default(),
            ..GridStyle::default()
        };
        let lines = style.resolve_lines(&parent);
        assert_eq!(lines.minor, LineStyle { color: RED, width: 1.0 });
        assert_eq!(lines.minor, lines.major);
    }

    #[test]
    fn unset_styles_fall_back_to_parent() {
        let parent = LineStyle { color: BLACK, width: 1.5 };
        let style = GridStyle {
            minor_style: GridlineStyle::default(),
            major_style: GridlineStyle::default(),
            ..GridStyle::default()
        };
        let lines = style.resolve_lines(&parent);
        assert_eq!(lines.minor, parent);
        assert_eq!(lines.major, parent);
    }
}
