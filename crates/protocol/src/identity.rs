use serde::Serialize;

/// npm/nbextension module name the frontend models are registered under.
pub const MODULE_NAME: &str = "jupyter-threeplot";
/// Version of the frontend module this kernel side is compatible with.
pub const MODULE_VERSION: &str = "1.0.0";

/// Which frontend model class a widget is paired with.
///
/// Serialized as the three underscored identity fields the widget manager
/// reads before any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModelIdentity {
    #[serde(rename = "_model_name")]
    pub model_name: &'static str,
    #[serde(rename = "_model_module")]
    pub model_module: &'static str,
    #[serde(rename = "_model_module_version")]
    pub model_module_version: &'static str,
}

impl ModelIdentity {
    /// Identity of a model provided by this extension's frontend module.
    pub const fn threeplot(model_name: &'static str) -> Self {
        Self {
            model_name,
            model_module: MODULE_NAME,
            model_module_version: MODULE_VERSION,
        }
    }

    /// `(field name, value)` pairs in wire order.
    pub fn fields(&self) -> [(&'static str, &'static str); 3] {
        [
            ("_model_name", self.model_name),
            ("_model_module", self.model_module),
            ("_model_module_version", self.model_module_version),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_underscored_fields() {
        let json = serde_json::to_value(ModelIdentity::threeplot("GridCrossModel"))
            .unwrap_or_default();
        assert_eq!(json["_model_name"], "GridCrossModel");
        assert_eq!(json["_model_module"], "jupyter-threeplot");
        assert_eq!(json["_model_module_version"], "1.0.0");
    }

    #[test]
    fn fields_in_wire_order() {
        let fields = ModelIdentity::threeplot("LinearScaleModel").fields();
        assert_eq!(fields[0], ("_model_name", "LinearScaleModel"));
        assert_eq!(fields[2], ("_model_module_version", MODULE_VERSION));
    }
}
