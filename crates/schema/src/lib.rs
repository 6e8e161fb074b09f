//! Field descriptors and the two schema primitives built from them.
//!
//! A [`RecordSchema`] maps field names to [`Descriptor`]s, a
//! [`SequenceSchema`] lists them positionally. Both derive their default
//! value from their fields' defaults when they are built, recursing into
//! nested schemas, so a schema's default is always a plain [`Value`] tree:
//!
//! ```
//! use threeplot_schema::{record, Descriptor, RecordSchema, Value};
//!
//! let gridline = RecordSchema::builder()
//!     .field("label_format", Descriptor::string(""))
//!     .field("line_width", Descriptor::optional_float(Some(1.0)))
//!     .build()?;
//! let grid = RecordSchema::builder()
//!     .field("label", Descriptor::string(""))
//!     .field("minor_style", Descriptor::record(gridline))
//!     .build()?;
//!
//! assert_eq!(
//!     grid.default_value(),
//!     record! {
//!         "label" => "",
//!         "minor_style" => record! { "label_format" => "", "line_width" => 1.0 },
//!     }
//! );
//! # Ok::<(), threeplot_schema::SchemaError>(())
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod record;
pub mod sequence;
pub mod value;

pub use catalog::{Declaration, SchemaCatalog};
pub use descriptor::Descriptor;
pub use error::{SchemaError, ValidationError};
pub use record::{RecordSchema, RecordSchemaBuilder};
pub use sequence::SequenceSchema;
pub use value::{Record, Value};

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn scalar() -> impl Strategy<Value = Descriptor> {
        prop_oneof![
            "[a-z]{0,8}".prop_map(Descriptor::string),
            any::<bool>().prop_map(Descriptor::boolean),
            (-1e6f64..1e6).prop_map(Descriptor::float),
            proptest::option::of(-1e6f64..1e6).prop_map(Descriptor::optional_float),
        ]
    }

    /// Scalars, plus records and sequences of them, two levels deep.
    fn descriptor() -> impl Strategy<Value = Descriptor> {
        scalar().prop_recursive(2, 16, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 1..4).prop_filter_map(
                    "sequence should compile",
                    |fields| SequenceSchema::new(fields).ok().map(Descriptor::sequence)
                ),
                proptest::collection::btree_map("[a-z]{1,6}", inner, 1..4).prop_filter_map(
                    "record should compile",
                    |fields| RecordSchema::new(fields).ok().map(Descriptor::record)
                ),
            ]
        })
    }

    proptest! {
        #[test]
        fn record_default_equals_field_defaults(
            fields in proptest::collection::btree_map("[a-z]{1,6}", descriptor(), 1..6)
        ) {
            let schema = RecordSchema::new(fields.clone())?;
            prop_assert_eq!(schema.len(), fields.len());
            for (key, descriptor) in &fields {
                prop_assert_eq!(schema.default_record().get(key), Some(&descriptor.default_value()?));
            }
        }

        #[test]
        fn sequence_default_is_positional(
            fields in proptest::collection::vec(descriptor(), 1..6)
        ) {
            let schema = SequenceSchema::new(fields.clone())?;
            prop_assert_eq!(schema.default_items().len(), fields.len());
            for (i, descriptor) in fields.iter().enumerate() {
                prop_assert_eq!(&schema.default_items()[i], &descriptor.default_value()?);
            }
        }

        #[test]
        fn default_is_idempotent(
            fields in proptest::collection::vec(descriptor(), 1..6)
        ) {
            let schema = SequenceSchema::new(fields)?;
            let before = schema.clone();
            prop_assert_eq!(schema.default_value(), schema.default_value());
            prop_assert_eq!(schema, before);
        }

        #[test]
        fn default_validates_against_its_own_schema(
            fields in proptest::collection::btree_map("[a-z]{1,6}", descriptor(), 1..6)
        ) {
            let schema = RecordSchema::new(fields)?;
            prop_assert_eq!(schema.validate("root", schema.default_value()), Ok(schema.default_value()));
        }
    }
}
