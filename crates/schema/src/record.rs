use indexmap::IndexMap;

use crate::catalog::{Compiler, SchemaCatalog};
use crate::descriptor::{Descriptor, key_path};
use crate::error::{SchemaError, ValidationError};
use crate::value::{Record, Value};

/// A record of named fields whose default is derived from the fields' own
/// defaults.
///
/// The default is computed once, when the schema is built, and cached.
/// Nested record and sequence fields contribute their own derived default,
/// so the cached value is a plain tree of values. A schema that cannot
/// derive a default for every field is never built.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    fields: IndexMap<String, Descriptor>,
    default: Record,
}

impl RecordSchema {
    /// Build a schema from `(name, descriptor)` pairs, in order.
    ///
    /// A name given twice keeps its first position and its last descriptor.
    pub fn new<K, I>(fields: I) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Descriptor)>,
    {
        Self::new_in(fields, &SchemaCatalog::default())
    }

    /// Like [`RecordSchema::new`], resolving `Named` fields through `catalog`.
    pub fn new_in<K, I>(fields: I, catalog: &SchemaCatalog) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Descriptor)>,
    {
        let fields = fields.into_iter().map(|(k, d)| (k.into(), d)).collect();
        Compiler::new(catalog).record(fields)
    }

    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::default()
    }

    /// Assemble already compiled fields with their derived default.
    pub(crate) fn from_parts(fields: IndexMap<String, Descriptor>, default: Record) -> Self {
        Self { fields, default }
    }

    pub fn fields(&self) -> &IndexMap<String, Descriptor> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Descriptor> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The cached default. Callers get their own copy to modify.
    pub fn default_value(&self) -> Value {
        Value::Record(self.default.clone())
    }

    pub fn default_record(&self) -> &Record {
        &self.default
    }

    /// Validate a replacement record.
    ///
    /// Every given key must be a declared field; declared fields missing
    /// from `value` keep their default. The result is in declaration order.
    pub fn validate(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        let Value::Record(mut given) = value else {
            return Err(ValidationError::WrongType {
                field: field.to_string(),
                expected: "record",
                found: value.kind_name(),
            });
        };
        if let Some(unknown) = given.keys().find(|k| !self.fields.contains_key(*k)) {
            return Err(ValidationError::UnknownField(key_path(field, unknown)));
        }
        let mut validated = Record::with_capacity(self.fields.len());
        for (key, descriptor) in &self.fields {
            let value = match given.shift_remove(key) {
                Some(v) => descriptor.validate(&key_path(field, key), v)?,
                None => self.default[key].clone(),
            };
            validated.insert(key.clone(), value);
        }
        Ok(Value::Record(validated))
    }
}

/// Declarative construction of a [`RecordSchema`], one field at a time.
#[derive(Debug, Default)]
pub struct RecordSchemaBuilder {
    fields: Vec<(String, Descriptor)>,
}

impl RecordSchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        RecordSchema::new(self.fields)
    }

    pub fn build_in(self, catalog: &SchemaCatalog) -> Result<RecordSchema, SchemaError> {
        RecordSchema::new_in(self.fields, catalog)
    }
}
