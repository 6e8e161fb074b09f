use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use threeplot_protocol::{BLACK, Color, ModelIdentity, ModelKind, ModelRef};
use threeplot_schema::{Descriptor, Record, SchemaError, ValidationError, Value};

use super::{
    AutosizeAxes, AutosizeMode, LazyRegistry, Widget, autosize_axes_descriptor,
    autosize_target_descriptor, force, grid_styles_descriptor, scales_descriptor, unknown,
    values_with_identity,
};
use crate::convert::{FromValue, ToValue};
use crate::registry::{FieldRegistry, RegistryError};
use crate::styles::{GridStyle, LineStyle};

const IDENTITY: ModelIdentity = ModelIdentity::threeplot("GridCrossModel");

static REGISTRY: LazyRegistry = LazyLock::new(registry);

fn registry() -> Result<FieldRegistry, SchemaError> {
    let defaults = GridCross::default();
    FieldRegistry::builder(IDENTITY)
        .synced("scales", scales_descriptor(3)?)
        .synced("grid_styles", grid_styles_descriptor(&defaults.grid_styles)?)
        .help("grid styles in the order: XY, XZ, YZ")
        .synced("autosize_target", autosize_target_descriptor())
        .synced("autosize_axes", autosize_axes_descriptor()?)
        .synced("mode", defaults.mode.descriptor())
        .synced("camera", Descriptor::optional_instance(ModelKind::Camera))
        .help("Needed for minmax grid mode")
        .synced("tight", Descriptor::boolean(defaults.tight))
        .synced("line_color", Descriptor::color(defaults.line_color))
        .synced("line_width", Descriptor::float(defaults.line_width))
        .build()
}

/// Three orthogonal planar grids (XY, XZ, YZ) that can size themselves to
/// a target object.
///
/// Model references are attached at runtime and never read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridCross {
    #[serde(skip_deserializing)]
    pub scales: [Option<ModelRef>; 3],
    pub grid_styles: [GridStyle; 3],
    #[serde(skip_deserializing)]
    pub autosize_target: Option<ModelRef>,
    pub autosize_axes: AutosizeAxes,
    pub mode: AutosizeMode,
    #[serde(skip_deserializing)]
    pub camera: Option<ModelRef>,
    pub tight: bool,
    pub line_color: Color,
    pub line_width: f64,
}

impl Default for GridCross {
    fn default() -> Self {
        Self {
            scales: [None, None, None],
            grid_styles: [GridStyle::default(), GridStyle::default(), GridStyle::default()],
            autosize_target: None,
            autosize_axes: AutosizeAxes::default(),
            mode: AutosizeMode::Min,
            camera: None,
            tight: false,
            line_color: BLACK,
            line_width: 1.0,
        }
    }
}

impl GridCross {
    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            color: self.line_color.clone(),
            width: self.line_width,
        }
    }

    /// `mode = minmax` places the grids relative to the camera.
    pub fn needs_camera(&self) -> bool {
        self.mode == AutosizeMode::MinMax && self.camera.is_none()
    }
}

impl Widget for GridCross {
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
                ("camera", self.camera.to_value()),
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
            "camera" => self.camera = FromValue::from_value(name, value)?,
            "tight" => self.tight = FromValue::from_value(name, value)?,
            "line_color" => self.line_color = FromValue::from_value(name, value)?,
            "line_width" => self.line_width = FromValue::from_value(name, value)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}
