use crate::catalog::{Compiler, SchemaCatalog};
use crate::descriptor::{Descriptor, index_path};
use crate::error::{SchemaError, ValidationError};
use crate::value::Value;

/// A fixed-length, positional sequence whose default is each element's
/// default, in order.
///
/// The length is part of the schema: replacements of any other length are
/// rejected with [`SchemaError::ShapeMismatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSchema {
    fields: Vec<Descriptor>,
    default: Vec<Value>,
}

impl SequenceSchema {
    pub fn new<I>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = Descriptor>,
    {
        Self::new_in(fields, &SchemaCatalog::default())
    }

    pub fn new_in<I>(fields: I, catalog: &SchemaCatalog) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = Descriptor>,
    {
        Compiler::new(catalog).sequence(fields.into_iter().collect())
    }

    /// `count` copies of the same descriptor.
    pub fn repeat(descriptor: &Descriptor, count: usize) -> Result<Self, SchemaError> {
        Self::new(std::iter::repeat_n(descriptor.clone(), count))
    }

    pub(crate) fn from_parts(fields: Vec<Descriptor>, default: Vec<Value>) -> Self {
        Self { fields, default }
    }

    pub fn fields(&self) -> &[Descriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn default_value(&self) -> Value {
        Value::Sequence(self.default.clone())
    }

    pub fn default_items(&self) -> &[Value] {
        &self.default
    }

    /// Check that a replacement has exactly this schema's length.
    pub fn check_shape(&self, found: usize) -> Result<(), SchemaError> {
        if found == self.fields.len() {
            Ok(())
        } else {
            Err(SchemaError::ShapeMismatch {
                expected: self.fields.len(),
                found,
            })
        }
    }

    /// Validate a replacement sequence element by element.
    pub fn validate(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        let Value::Sequence(items) = value else {
            return Err(ValidationError::WrongType {
                field: field.to_string(),
                expected: "sequence",
                found: value.kind_name(),
            });
        };
        self.check_shape(items.len())
            .map_err(|source| ValidationError::Shape {
                field: field.to_string(),
                source,
            })?;
        self.fields
            .iter()
            .zip(items)
            .enumerate()
            .map(|(i, (descriptor, item))| descriptor.validate(&index_path(field, i), item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordSchema;
    use threeplot_protocol::{ModelKind, ModelRef};

    #[test]
    fn positional_defaults() {
        let schema = SequenceSchema::new([
            Descriptor::string("x"),
            Descriptor::float(2.0),
            Descriptor::optional_float(None),
        ])
        .unwrap();
        assert_eq!(schema.len(), 3);
        for (i, descriptor) in schema.fields().iter().enumerate() {
            assert_eq!(schema.default_items()[i], descriptor.default_value().unwrap());
        }
    }

    #[test]
    fn nested_records_are_expanded() {
        let style = RecordSchema::new([("label", Descriptor::string(""))]).unwrap();
        let styles = SequenceSchema::repeat(&Descriptor::record(style.clone()), 2).unwrap();
        assert_eq!(
            styles.default_value(),
            Value::Sequence(vec![style.default_value(), style.default_value()])
        );
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(
            SequenceSchema::new(Vec::new()),
            Err(SchemaError::EmptySchema("sequence"))
        );
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() {
        let scales =
            SequenceSchema::repeat(&Descriptor::optional_instance(ModelKind::ContinuousScale), 3)
                .unwrap();
        assert_eq!(
            scales.check_shape(2),
            Err(SchemaError::ShapeMismatch {
                expected: 3,
                found: 2
            })
        );
        let two = Value::Sequence(vec![Value::Absent, Value::Absent]);
        assert!(matches!(
            scales.validate("scales", two),
            Err(ValidationError::Shape { .. })
        ));
    }

    #[test]
    fn validates_each_position() {
        let scales =
            SequenceSchema::repeat(&Descriptor::optional_instance(ModelKind::ContinuousScale), 2)
                .unwrap();
        let scale = Value::Ref(ModelRef::new("a", ModelKind::ContinuousScale));
        assert_eq!(
            scales.validate("scales", Value::Sequence(vec![scale.clone(), Value::Absent])),
            Ok(Value::Sequence(vec![scale, Value::Absent]))
        );
        let camera = Value::Ref(ModelRef::new("c", ModelKind::Camera));
        assert!(matches!(
            scales.validate("scales", Value::Sequence(vec![Value::Absent, camera])),
            Err(ValidationError::WrongModelKind { field, .. }) if field == "scales[1]"
        ));
    }
}
