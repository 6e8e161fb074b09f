use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use threeplot_protocol::{BLACK, Color, ModelIdentity, ModelRef};
use threeplot_schema::{Descriptor, Record, SchemaError, ValidationError, Value};

use super::{
    AutosizeAxes, AutosizeMode, LazyRegistry, Widget, autosize_axes_descriptor,
    autosize_target_descriptor, force, grid_styles_descriptor, scales_descriptor, unknown,
    values_with_identity,
};
use crate::convert::{FromValue, ToValue};
use crate::registry::{FieldRegistry, RegistryError};
use crate::styles::{GridStyle, LineStyle};

const IDENTITY: ModelIdentity = ModelIdentity::threeplot("CylindricalGridModel");

static REGISTRY: LazyRegistry = LazyLock::new(registry);

fn registry() -> Result<FieldRegistry, SchemaError> {
    let defaults = CylindricalGrid::default();
    FieldRegistry::builder(IDENTITY)
        .synced("scales", scales_descriptor(2)?)
        .synced("grid_styles", grid_styles_descriptor(&defaults.grid_styles)?)
        .help("grid styles in the order: polar, axial")
        .synced("autosize_target", autosize_target_descriptor())
        .synced("autosize_axes", autosize_axes_descriptor()?)
        .synced("mode", defaults.mode.descriptor())
        .synced("tight", Descriptor::boolean(defaults.tight))
        .synced("line_color", Descriptor::color(defaults.line_color))
        .synced("line_width", Descriptor::float(defaults.line_width))
        .build()
}

/// A polar grid and an axial grid around a common axis; one scale for the
/// radius, one for the height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylindricalGrid {
    #[serde(skip_deserializing)]
    pub scales: [Option<ModelRef>; 2],
    pub grid_styles: [GridStyle; 2],
    #[serde(skip_deserializing)]
    pub autosize_target: Option<ModelRef>,
    pub autosize_axes: AutosizeAxes,
    pub mode: AutosizeMode,
    pub tight: bool,
    pub line_color: Color,
    pub line_width: f64,
}

impl Default for CylindricalGrid {
    fn default() -> Self {
        Self {
            scales: [None, None],
            grid_styles: [GridStyle::default(), GridStyle::default()],
            autosize_target: None,
            autosize_axes: AutosizeAxes::default(),
            mode: AutosizeMode::Min,
            tight: false,
            line_color: BLACK,
            line_width: 1.0,
        }
    }
}

impl CylindricalGrid {
    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            color: self.line_color.clone(),
            width: self.line_width,
        }
    }

    pub fn polar(&self) -> &GridStyle {
        &self.grid_styles[0]
    }

    pub fn axial(&self) -> &GridStyle {
        &self.grid_styles[1]
    }
}

impl Widget for CylindricalGrid {
    fn registry() -> Result<&'static FieldRegistry, RegistryError> {
        force(&REGISTRY)
    }

    fn to_values(&self) -> Record {
        values_with_identity(
            IDENTITY,
            [
                ("scales", self.scales.to_value()),
                ("grid_styles", self.grid_styles.to_value()),
                ("autosize_target", self.autosize_target.to_value()),
                ("autosize_axes", self.autosize_axes.to_value()),
                ("mode", self.mode.to_value()),
                ("tight", self.tight.to_value()),
                ("line_color", self.line_color.to_value()),
                ("line_width", self.line_width.to_value()),
            ],
        )
    }

    fn apply_validated(&mut self, name: &str, value: &Value) -> Result<(), ValidationError> {
        match name {
            "scales" => self.scales = FromValue::from_value(name, value)?,
            "grid_styles" => self.grid_styles = FromValue::from_value(name, value)?,
            "autosize_target" => self.autosize_target = FromValue::from_value(name, value)?,
            "autosize_axes" => self.autosize_axes = FromValue::from_value(name, value)?,
            "mode" => self.mode = FromValue::from_value(name, value)?,
            "tight" => self.tight = FromValue::from_value(name, value)?,
            "line_color" => self.line_color = FromValue::from_value(name, value)?,
            "line_width" => self.line_width = FromValue::from_value(name, value)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threeplot_protocol::ModelKind;

    #[test]
    fn two_grids_and_two_scales() {
        let registry = CylindricalGrid::registry().unwrap();
        let defaults = registry.defaults();
        let len = |key: &str| defaults.get(key).and_then(Value::as_sequence).map(<[Value]>::len);
        assert_eq!(len("grid_styles"), Some(2));
        assert_eq!(len("scales"), Some(2));
        assert!(registry.field("camera").is_none());
        assert_eq!(defaults, &CylindricalGrid::default().to_values());
    }

    #[test]
    fn three_grid_styles_do_not_fit() {
        let mut grid = CylindricalGrid::default();
        let three = Value::Sequence(vec![GridStyle::default().to_value(); 3]);
        assert_eq!(
            grid.apply("grid_styles", three),
            Err(RegistryError::Validation(ValidationError::Shape {
                field: "grid_styles".to_string(),
                source: SchemaError::ShapeMismatch {
                    expected: 2,
                    found: 3
                },
            }))
        );
    }

    #[test]
    fn scales_must_be_continuous() {
        let mut grid = CylindricalGrid::default();
        let scene = Value::Ref(ModelRef::new("s", ModelKind::Scene));
        let scales = Value::Sequence(vec![scene, Value::Absent]);
        assert!(matches!(
            grid.apply("scales", scales),
            Err(RegistryError::Validation(ValidationError::WrongModelKind { .. }))
        ));
    }
}
