use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use threeplot_protocol::ModelIdentity;
use threeplot_schema::{Descriptor, Record, SchemaError, ValidationError, Value};

use super::{LazyRegistry, Widget, force, unknown, values_with_identity};
use crate::convert::{FromValue, ToValue};
use crate::registry::{FieldRegistry, RegistryError};

const IDENTITY: ModelIdentity = ModelIdentity::threeplot("LinearScaleModel");

static REGISTRY: LazyRegistry = LazyLock::new(registry);

fn registry() -> Result<FieldRegistry, SchemaError> {
    FieldRegistry::builder(IDENTITY)
        .synced("offset", Descriptor::float(0.0))
        .synced("scale", Descriptor::float(0.0))
        .build()
}

/// `y = scale * (x - offset)`, evaluated by the frontend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearScale {
    pub offset: f64,
    pub scale: f64,
}

impl Widget for LinearScale {
    fn registry() -> Result<&'static FieldRegistry, RegistryError> {
        force(&REGISTRY)
    }

    fn to_values(&self) -> Record {
        values_with_identity(
            IDENTITY,
            [
                ("offset", self.offset.to_value()),
                ("scale", self.scale.to_value()),
            ],
        )
    }

    fn apply_validated(&mut self, name: &str, value: &Value) -> Result<(), ValidationError> {
        match name {
            "offset" => self.offset = FromValue::from_value(name, value)?,
            "scale" => self.scale = FromValue::from_value(name, value)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_state_is_flat() {
        let state = LinearScale::default().sync_state().unwrap();
        let keys: Vec<_> = state.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["_model_name", "_model_module", "_model_module_version", "offset", "scale"]
        );
        assert_eq!(state["_model_name"], "LinearScaleModel");
        assert_eq!(state["scale"], 0.0);
    }

    #[test]
    fn values_are_cast_to_float() {
        let mut scale = LinearScale::default();
        scale.apply("offset", Value::Bool(true)).unwrap();
        scale.apply("scale", Value::from(" 4 ")).unwrap();
        assert_eq!(scale, LinearScale { offset: 1.0, scale: 4.0 });
    }

    #[test]
    fn identity_is_read_only() {
        let mut scale = LinearScale::default();
        assert_eq!(
            scale.apply("_model_name", Value::from("OtherModel")),
            Err(RegistryError::ReadOnly("_model_name".to_string()))
        );
    }
}
