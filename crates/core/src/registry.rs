use indexmap::IndexMap;
use thiserror::Error;
use threeplot_protocol::ModelIdentity;
use threeplot_schema::{Descriptor, Record, RecordSchema, SchemaError, ValidationError, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("field declaration: {0}")]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("`{0}` is read-only")]
    ReadOnly(String),
    #[error("state serialization: {0}")]
    Serialize(String),
}

/// One declared field of a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub descriptor: Descriptor,
    /// Whether the field is mirrored to the frontend model.
    pub sync: bool,
    /// Fixed at declaration; updates are refused.
    pub read_only: bool,
    pub help: Option<&'static str>,
}

/// The static declaration of a widget's fields: name, type, default and
/// synchronization flag for each, plus the frontend model it pairs with.
///
/// Built once per widget type. The identity fields (`_model_name`, ...)
/// come first and are read-only; the defaults of all fields are derived
/// through a single [`RecordSchema`], so a registry that builds has a
/// well-defined initial state.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    identity: ModelIdentity,
    specs: IndexMap<&'static str, FieldSpec>,
    schema: RecordSchema,
}

impl FieldRegistry {
    pub fn builder(identity: ModelIdentity) -> FieldRegistryBuilder {
        FieldRegistryBuilder::new(identity)
    }

    pub fn identity(&self) -> ModelIdentity {
        self.identity
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.values()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.specs.get(name)
    }

    pub fn synced(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.values().filter(|s| s.sync)
    }

    /// Every field's default, in declaration order.
    pub fn defaults(&self) -> &Record {
        self.schema.default_record()
    }

    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.schema.default_record().get(name)
    }

    /// Check an incoming value for `name`, returning it coerced.
    pub fn validate(&self, name: &str, value: Value) -> Result<Value, RegistryError> {
        let spec = self
            .specs
            .get(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;
        if spec.read_only {
            return Err(RegistryError::ReadOnly(name.to_string()));
        }
        Ok(spec.descriptor.validate(name, value)?)
    }

    /// The state sent to the frontend: synced fields only, in declaration
    /// order, taking each from `values` or else from its default.
    pub fn sync_state(
        &self,
        values: &Record,
    ) -> Result<serde_json::Map<String, serde_json::Value>, RegistryError> {
        self.synced()
            .map(|spec| {
                let value = values
                    .get(spec.name)
                    .or_else(|| self.default_of(spec.name))
                    .unwrap_or(&Value::Absent);
                serde_json::to_value(value)
                    .map(|json| (spec.name.to_string(), json))
                    .map_err(|e| RegistryError::Serialize(e.to_string()))
            })
            .collect()
    }
}

/// Declares a widget's fields in order.
#[derive(Debug)]
pub struct FieldRegistryBuilder {
    identity: ModelIdentity,
    specs: Vec<FieldSpec>,
}

impl FieldRegistryBuilder {
    fn new(identity: ModelIdentity) -> Self {
        let specs = identity
            .fields()
            .into_iter()
            .map(|(name, value)| FieldSpec {
                name,
                descriptor: Descriptor::string(value),
                sync: true,
                read_only: true,
                help: None,
            })
            .collect();
        Self { identity, specs }
    }

    /// A field mirrored to the frontend.
    pub fn synced(mut self, name: &'static str, descriptor: Descriptor) -> Self {
        self.specs.push(FieldSpec {
            name,
            descriptor,
            sync: true,
            read_only: false,
            help: None,
        });
        self
    }

    /// A kernel-side field the frontend never sees.
    pub fn local(mut self, name: &'static str, descriptor: Descriptor) -> Self {
        self.specs.push(FieldSpec {
            name,
            descriptor,
            sync: false,
            read_only: false,
            help: None,
        });
        self
    }

    /// Attach help text to the field declared last.
    pub fn help(mut self, text: &'static str) -> Self {
        if let Some(spec) = self.specs.last_mut() {
            spec.help = Some(text);
        }
        self
    }

    pub fn build(self) -> Result<FieldRegistry, SchemaError> {
        let schema =
            RecordSchema::new(self.specs.iter().map(|s| (s.name, s.descriptor.clone())))?;
        // The schema carries the compiled descriptors.
        let specs = self
            .specs
            .into_iter()
            .map(|mut spec| {
                if let Some(compiled) = schema.field(spec.name) {
                    spec.descriptor = compiled.clone();
                }
                (spec.name, spec)
            })
            .collect::<IndexMap<_, _>>();
        tracing::debug!(
            model = self.identity.model_name,
            fields = specs.len(),
            "built field registry"
        );
        Ok(FieldRegistry {
            identity: self.identity,
            specs,
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use threeplot_protocol::{ModelKind, ModelRef};

    fn registry() -> FieldRegistry {
        FieldRegistry::builder(ModelIdentity::threeplot("TestModel"))
            .synced("offset", Descriptor::float(0.0))
            .help("shift applied before scaling")
            .synced("target", Descriptor::optional_instance(ModelKind::Object3D))
            .local("cache_key", Descriptor::string("k"))
            .build()
            .unwrap()
    }

    #[test]
    fn identity_fields_lead() {
        let registry = registry();
        let names: Vec<_> = registry.fields().map(|s| s.name).collect();
        assert_eq!(
            names,
            [
                "_model_name",
                "_model_module",
                "_model_module_version",
                "offset",
                "target",
                "cache_key"
            ]
        );
        assert_eq!(registry.default_of("_model_name"), Some(&Value::from("TestModel")));
        assert_eq!(
            registry.field("offset").and_then(|s| s.help),
            Some("shift applied before scaling")
        );
    }

    #[test]
    fn sync_state_skips_local_fields() {
        let registry = registry();
        let mut values = Record::new();
        values.insert(
            "target".into(),
            Value::Ref(ModelRef::new("m1", ModelKind::Scene)),
        );
        let state = registry.sync_state(&values).unwrap();
        assert_eq!(state["_model_module"], "jupyter-threeplot");
        assert_eq!(state["offset"], 0.0);
        assert_eq!(state["target"], "IPY_MODEL_m1");
        assert!(!state.contains_key("cache_key"));
    }

    #[test]
    fn validate_rejects_identity_and_unknown_fields() {
        let registry = registry();
        assert_eq!(
            registry.validate("_model_name", Value::from("Other")),
            Err(RegistryError::ReadOnly("_model_name".to_string()))
        );
        assert_eq!(
            registry.validate("nope", Value::Bool(true)),
            Err(RegistryError::Validation(ValidationError::UnknownField("nope".to_string())))
        );
        assert_eq!(registry.validate("offset", Value::from("1.5")), Ok(Value::Float(1.5)));
    }

    #[test]
    fn required_field_fails_the_build() {
        let err = FieldRegistry::builder(ModelIdentity::threeplot("TestModel"))
            .synced("target", Descriptor::instance(ModelKind::Scene))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingDefault {
                field: "target".to_string()
            }
        );
    }
}
