use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use threeplot_protocol::{BLACK, BLUE, Color, GREEN, ModelIdentity, ModelRef, RED};
use threeplot_schema::{Descriptor, Record, SchemaError, SequenceSchema, ValidationError, Value};

use super::{LazyRegistry, Widget, force, scales_descriptor, unknown, values_with_identity};
use crate::convert::{FromValue, ToValue};
use crate::registry::{FieldRegistry, RegistryError};
use crate::styles::AxisStyle;

const IDENTITY: ModelIdentity = ModelIdentity::threeplot("AxesCrossModel");

static REGISTRY: LazyRegistry = LazyLock::new(registry);

fn registry() -> Result<FieldRegistry, SchemaError> {
    let defaults = AxesCross::default();
    let axes_styles = defaults
        .axes_styles
        .iter()
        .map(|style| style.schema().map(Descriptor::record))
        .collect::<Result<Vec<_>, _>>()?;
    FieldRegistry::builder(IDENTITY)
        .synced("scales", scales_descriptor(3)?)
        .synced(
            "axes_styles",
            Descriptor::sequence(SequenceSchema::new(axes_styles)?),
        )
        .synced("line_color", Descriptor::color(defaults.line_color))
        .synced("line_width", Descriptor::float(defaults.line_width))
        .build()
}

/// Three labelled axis lines through a common origin, x red, y green and
/// z blue by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesCross {
    #[serde(skip_deserializing)]
    pub scales: [Option<ModelRef>; 3],
    pub axes_styles: [AxisStyle; 3],
    pub line_color: Color,
    pub line_width: f64,
}

impl Default for AxesCross {
    fn default() -> Self {
        Self {
            scales: [None, None, None],
            axes_styles: [
                AxisStyle::new("x", RED),
                AxisStyle::new("y", GREEN),
                AxisStyle::new("z", BLUE),
            ],
            line_color: BLACK,
            line_width: 1.0,
        }
    }
}

impl Widget for AxesCross {
    fn registry() -> Result<&'static FieldRegistry, RegistryError> {
        force(&REGISTRY)
    }

    fn to_values(&self) -> Record {
        values_with_identity(
            IDENTITY,
            [
                ("scales", self.scales.to_value()),
                ("axes_styles", self.axes_styles.to_value()),
                ("line_color", self.line_color.to_value()),
                ("line_width", self.line_width.to_value()),
            ],
        )
    }

    fn apply_validated(&mut self, name: &str, value: &Value) -> Result<(), ValidationError> {
        match name {
            "scales" => self.scales = FromValue::from_value(name, value)?,
            "axes_styles" => self.axes_styles = FromValue::from_value(name, value)?,
            "line_color" => self.line_color = FromValue::from_value(name, value)?,
            "line_width" => self.line_width = FromValue::from_value(name, value)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}
