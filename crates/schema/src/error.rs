use thiserror::Error;
use threeplot_protocol::{ColorError, ModelKind, ReferenceError};

/// Errors in a schema declaration. They surface when a schema is compiled,
/// never when its default is used, and are fixed by fixing the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` has no admissible default")]
    MissingDefault { field: String },
    #[error("schema contains itself: {}", .cycle.join(" -> "))]
    CyclicSchema { cycle: Vec<String> },
    #[error("expected a sequence of length {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("no schema named `{0}` in the catalog")]
    UnknownSchema(String),
    #[error("a {0} schema needs at least one field")]
    EmptySchema(&'static str),
    #[error("invalid default: {reason}")]
    InvalidDefault { reason: String },
}

impl SchemaError {
    /// A default-less leaf; the enclosing schemas fill in the path.
    pub(crate) fn missing_default() -> Self {
        Self::MissingDefault {
            field: String::new(),
        }
    }

    /// Prefix the path of a `MissingDefault` with the record key it was found under.
    pub(crate) fn within_key(self, key: &str) -> Self {
        self.within(key)
    }

    /// Prefix the path of a `MissingDefault` with the sequence position it was found at.
    pub(crate) fn within_index(self, index: usize) -> Self {
        self.within(&format!("[{index}]"))
    }

    fn within(self, segment: &str) -> Self {
        match self {
            Self::MissingDefault { field } => Self::MissingDefault {
                field: join_path(segment, &field),
            },
            other => other,
        }
    }
}

/// `a` + `b.c` → `a.b.c`, `a` + `[1]` → `a[1]`.
pub(crate) fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

/// A value rejected by a field descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("`{field}` may not be absent")]
    NotNullable { field: String },
    #[error("`{field}` expected {expected}, got {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{field}`: {value:?} is not one of {choices:?}")]
    InvalidChoice {
        field: String,
        value: String,
        choices: Vec<String>,
    },
    #[error("`{field}`: {source}")]
    InvalidColor { field: String, source: ColorError },
    #[error("`{field}` expects a {expected} reference, got {found}")]
    WrongModelKind {
        field: String,
        expected: ModelKind,
        found: ModelKind,
    },
    #[error("`{field}` matched none of the union's variants")]
    NoVariant { field: String },
    #[error("`{field}`: {source}")]
    BadReference {
        field: String,
        source: ReferenceError,
    },
    #[error("`{field}`: {source}")]
    Shape { field: String, source: SchemaError },
    #[error("`{field}` refers to schema `{name}`, which was never compiled")]
    Unresolved { field: String, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_nest_outward() {
        let err = SchemaError::missing_default()
            .within_key("line_width")
            .within_key("minor_style")
            .within_index(1);
        assert_eq!(
            err,
            SchemaError::MissingDefault {
                field: "[1].minor_style.line_width".to_string()
            }
        );
    }

    #[test]
    fn only_missing_default_carries_a_path() {
        let err = SchemaError::UnknownSchema("grid".into()).within_key("x");
        assert_eq!(err, SchemaError::UnknownSchema("grid".into()));
    }

    #[test]
    fn cycle_message_lists_the_loop() {
        let err = SchemaError::CyclicSchema {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "schema contains itself: a -> b -> a");
    }
}
