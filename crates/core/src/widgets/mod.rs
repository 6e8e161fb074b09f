//! The four domain widgets.
//!
//! Each widget is a typed struct paired with a [`FieldRegistry`] built once
//! per process. The struct's `Default` and the registry's derived defaults
//! describe the same initial state; updates arriving from the frontend are
//! validated against the registry before they touch the struct.

mod axes_cross;
mod cylindrical;
mod grid_cross;
mod linear_scale;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use threeplot_protocol::{ModelIdentity, ModelKind};
use threeplot_schema::{Descriptor, Record, SchemaError, SequenceSchema, ValidationError, Value};

use crate::convert::{FromValue, ToValue, wrong_type};
use crate::registry::{FieldRegistry, RegistryError};
use crate::styles::GridStyle;

pub use axes_cross::AxesCross;
pub use cylindrical::CylindricalGrid;
pub use grid_cross::GridCross;
pub use linear_scale::LinearScale;

pub(crate) type LazyRegistry = LazyLock<Result<FieldRegistry, SchemaError>>;

pub trait Widget {
    /// The field declaration shared by every instance.
    fn registry() -> Result<&'static FieldRegistry, RegistryError>;

    /// Current value of every declared field, identity fields included.
    fn to_values(&self) -> Record;

    /// Store an already validated value.
    fn apply_validated(&mut self, name: &str, value: &Value) -> Result<(), ValidationError>;

    /// Validate an update from the sync boundary and store it. A rejected
    /// update leaves the widget unchanged.
    fn apply(&mut self, name: &str, value: Value) -> Result<(), RegistryError> {
        let registry = Self::registry()?;
        let value = registry.validate(name, value)?;
        tracing::trace!(
            model = registry.identity().model_name,
            field = name,
            "applying update"
        );
        self.apply_validated(name, &value)?;
        Ok(())
    }

    fn sync_state(&self) -> Result<serde_json::Map<String, serde_json::Value>, RegistryError> {
        Self::registry()?.sync_state(&self.to_values())
    }
}

pub(crate) fn force(registry: &'static LazyRegistry) -> Result<&'static FieldRegistry, RegistryError> {
    LazyLock::force(registry)
        .as_ref()
        .map_err(|e| RegistryError::Schema(e.clone()))
}

/// Identity fields in front of the widget's own values.
pub(crate) fn values_with_identity<const N: usize>(
    identity: ModelIdentity,
    fields: [(&str, Value); N],
) -> Record {
    identity
        .fields()
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .chain(fields.into_iter().map(|(k, v)| (k.to_string(), v)))
        .collect()
}

pub(crate) fn unknown(name: &str) -> ValidationError {
    ValidationError::UnknownField(name.to_string())
}

/// `N` scale slots, each an optional continuous scale.
pub(crate) fn scales_descriptor(count: usize) -> Result<Descriptor, SchemaError> {
    let slot = Descriptor::optional_instance(ModelKind::ContinuousScale);
    Ok(Descriptor::sequence(SequenceSchema::repeat(&slot, count)?))
}

/// One record per grid, each defaulting to the matching style.
pub(crate) fn grid_styles_descriptor(styles: &[GridStyle]) -> Result<Descriptor, SchemaError> {
    let fields = styles
        .iter()
        .map(|style| style.schema().map(Descriptor::record))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Descriptor::sequence(SequenceSchema::new(fields)?))
}

/// Object the grid sizes itself to: a scene or any 3D object.
pub(crate) fn autosize_target_descriptor() -> Descriptor {
    Descriptor::union(vec![
        Descriptor::optional_instance(ModelKind::Scene),
        Descriptor::optional_instance(ModelKind::Object3D),
    ])
}

pub(crate) fn autosize_axes_descriptor() -> Result<Descriptor, SchemaError> {
    let per_axis = SequenceSchema::repeat(&Descriptor::boolean(true), 3)?;
    Descriptor::union(vec![
        Descriptor::boolean(true),
        Descriptor::sequence(per_axis),
    ])
    .with_default(true)
}

/// Where a grid is placed along the axes it does not span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutosizeMode {
    #[default]
    Min,
    Max,
    /// Follows the camera; needs one set.
    MinMax,
    Zero,
}

impl AutosizeMode {
    pub const CHOICES: [&'static str; 4] = ["min", "max", "minmax", "zero"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::MinMax => "minmax",
            Self::Zero => "zero",
        }
    }

    pub(crate) fn descriptor(self) -> Descriptor {
        Descriptor::choice(Self::CHOICES, self.as_str())
    }
}

impl ToValue for AutosizeMode {
    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl FromValue for AutosizeMode {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        match value.as_str() {
            Some("min") => Ok(Self::Min),
            Some("max") => Ok(Self::Max),
            Some("minmax") => Ok(Self::MinMax),
            Some("zero") => Ok(Self::Zero),
            Some(other) => Err(ValidationError::InvalidChoice {
                field: field.to_string(),
                value: other.to_string(),
                choices: Self::CHOICES.map(String::from).to_vec(),
            }),
            None => Err(wrong_type(field, "string", value)),
        }
    }
}

/// Which axes follow the autosize target: all or none, or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutosizeAxes {
    All(bool),
    PerAxis([bool; 3]),
}

impl Default for AutosizeAxes {
    fn default() -> Self {
        Self::All(true)
    }
}

impl ToValue for AutosizeAxes {
    fn to_value(&self) -> Value {
        match self {
            Self::All(all) => all.to_value(),
            Self::PerAxis(axes) => axes.to_value(),
        }
    }
}

impl FromValue for AutosizeAxes {
    fn from_value(field: &str, value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Bool(all) => Ok(Self::All(*all)),
            Value::Sequence(_) => <[bool; 3]>::from_value(field, value).map(Self::PerAxis),
            other => Err(wrong_type(field, "bool or three bools", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threeplot_protocol::ModelRef;

    #[test]
    fn autosize_axes_accepts_both_shapes() {
        let descriptor = autosize_axes_descriptor().unwrap();
        assert_eq!(descriptor.default_value(), Ok(Value::Bool(true)));
        let per_axis = Value::Sequence(vec![true.into(), false.into(), true.into()]);
        let validated = descriptor.validate("autosize_axes", per_axis).unwrap();
        assert_eq!(
            AutosizeAxes::from_value("autosize_axes", &validated),
            Ok(AutosizeAxes::PerAxis([true, false, true]))
        );
        let two = Value::Sequence(vec![true.into(), false.into()]);
        assert_eq!(
            descriptor.validate("autosize_axes", two),
            Err(ValidationError::NoVariant {
                field: "autosize_axes".to_string()
            })
        );
    }

    #[test]
    fn autosize_target_takes_any_object() {
        let descriptor = autosize_target_descriptor();
        assert_eq!(descriptor.default_value(), Ok(Value::Absent));
        let object = Value::Ref(ModelRef::new("o", ModelKind::Object3D));
        assert!(descriptor.validate("t", object).is_ok());
        let scale = Value::Ref(ModelRef::new("s", ModelKind::ContinuousScale));
        assert!(descriptor.validate("t", scale).is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AutosizeMode::MinMax).unwrap(), "\"minmax\"");
        for choice in AutosizeMode::CHOICES {
            let mode = AutosizeMode::from_value("mode", &Value::from(choice)).unwrap();
            assert_eq!(mode.as_str(), choice);
        }
    }

    #[test]
    fn scales_default_to_empty_slots() {
        let descriptor = scales_descriptor(2).unwrap();
        assert_eq!(
            descriptor.default_value(),
            Ok(Value::Sequence(vec![Value::Absent, Value::Absent]))
        );
    }
}
