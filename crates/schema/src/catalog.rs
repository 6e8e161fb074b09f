use std::sync::Arc;

use indexmap::IndexMap;

use crate::descriptor::Descriptor;
use crate::error::SchemaError;
use crate::record::RecordSchema;
use crate::sequence::SequenceSchema;
use crate::value::{Record, Value};

/// An uncompiled schema body registered under a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Descriptor(Descriptor),
    Record(Vec<(String, Descriptor)>),
    Sequence(Vec<Descriptor>),
}

/// Named schema declarations that may refer to each other through
/// [`Descriptor::Named`].
///
/// Declaring is free of checks. Compiling a name folds the declaration
/// tree into concrete schemas, at which point unknown names and
/// self-reference (direct or through other names) are reported.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    declarations: IndexMap<String, Declaration>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>, declaration: Declaration) -> &mut Self {
        self.declarations.insert(name.into(), declaration);
        self
    }

    pub fn declare_record<K: Into<String>>(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Descriptor)>,
    ) -> &mut Self {
        let fields = fields.into_iter().map(|(k, d)| (k.into(), d)).collect();
        self.declare(name, Declaration::Record(fields))
    }

    pub fn declare_sequence(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = Descriptor>,
    ) -> &mut Self {
        self.declare(name, Declaration::Sequence(fields.into_iter().collect()))
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Compile `name` into a descriptor with every reference resolved.
    pub fn compile(&self, name: &str) -> Result<Descriptor, SchemaError> {
        Compiler::new(self).named(name)
    }

    /// The derived default of the schema declared as `name`.
    pub fn default_of(&self, name: &str) -> Result<Value, SchemaError> {
        self.compile(name)?.default_value()
    }
}

/// The default-derivation fold.
///
/// Walks a descriptor tree, replacing `Named` references with their compiled
/// schemas and computing each record and sequence default bottom-up. The
/// stack of names currently being expanded is the cycle guard: meeting a
/// name that is already on it ends the fold with `CyclicSchema` instead of
/// recursing.
pub(crate) struct Compiler<'a> {
    catalog: &'a SchemaCatalog,
    expanding: Vec<String>,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(catalog: &'a SchemaCatalog) -> Self {
        Self {
            catalog,
            expanding: Vec::new(),
        }
    }

    fn descriptor(&mut self, descriptor: &Descriptor) -> Result<Descriptor, SchemaError> {
        match descriptor {
            Descriptor::Named(name) => self.named(name),
            Descriptor::Union { variants, default } => {
                let variants = variants
                    .iter()
                    .map(|v| self.descriptor(v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Descriptor::Union {
                    variants,
                    default: default.clone(),
                })
            }
            // Scalars need no work and composite schemas were compiled
            // when they were built.
            other => Ok(other.clone()),
        }
    }

    fn named(&mut self, name: &str) -> Result<Descriptor, SchemaError> {
        if let Some(start) = self.expanding.iter().position(|n| n == name) {
            let mut cycle = self.expanding[start..].to_vec();
            cycle.push(name.to_string());
            tracing::debug!(cycle = ?cycle, "schema cycle detected");
            return Err(SchemaError::CyclicSchema { cycle });
        }
        let declaration = self
            .catalog
            .get(name)
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))?;

        self.expanding.push(name.to_string());
        let compiled = match declaration {
            Declaration::Descriptor(d) => self.descriptor(d),
            Declaration::Record(fields) => self
                .record(fields.clone())
                .map(|s| Descriptor::Record(Arc::new(s))),
            Declaration::Sequence(fields) => self
                .sequence(fields.clone())
                .map(|s| Descriptor::Sequence(Arc::new(s))),
        };
        self.expanding.pop();
        compiled
    }

    pub(crate) fn record(
        &mut self,
        fields: Vec<(String, Descriptor)>,
    ) -> Result<RecordSchema, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema("record"));
        }
        let mut compiled = IndexMap::with_capacity(fields.len());
        for (key, descriptor) in fields {
            let descriptor = self
                .descriptor(&descriptor)
                .map_err(|e| e.within_key(&key))?;
            compiled.insert(key, descriptor);
        }
        let mut default = Record::with_capacity(compiled.len());
        for (key, descriptor) in &compiled {
            let value = descriptor
                .default_value()
                .map_err(|e| e.within_key(key))?;
            default.insert(key.clone(), value);
        }
        tracing::debug!(fields = compiled.len(), "compiled record schema");
        Ok(RecordSchema::from_parts(compiled, default))
    }

    pub(crate) fn sequence(
        &mut self,
        fields: Vec<Descriptor>,
    ) -> Result<SequenceSchema, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::EmptySchema("sequence"));
        }
        let compiled = fields
            .iter()
            .enumerate()
            .map(|(i, d)| self.descriptor(d).map_err(|e| e.within_index(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let default = compiled
            .iter()
            .enumerate()
            .map(|(i, d)| d.default_value().map_err(|e| e.within_index(i)))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(len = compiled.len(), "compiled sequence schema");
        Ok(SequenceSchema::from_parts(compiled, default))
    }
}
