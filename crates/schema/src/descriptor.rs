use std::sync::Arc;

use threeplot_protocol::{Color, ModelKind, ModelRef};

use crate::error::{SchemaError, ValidationError, join_path};
use crate::record::RecordSchema;
use crate::sequence::SequenceSchema;
use crate::value::Value;

/// Type and default of one value slot.
///
/// Scalars carry an optional default plus, where the slot can be empty, an
/// `allow_none` flag. A slot with neither a default nor `allow_none` is a
/// required field: asking it for a default fails with
/// [`SchemaError::MissingDefault`]. A nullable slot without a default simply
/// defaults to [`Value::Absent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Str {
        default: Option<String>,
    },
    /// A casting float: integers, booleans and numeric strings are coerced.
    Float {
        default: Option<f64>,
        allow_none: bool,
    },
    Bool {
        default: Option<bool>,
    },
    /// A string restricted to a fixed set of choices.
    Enum {
        choices: Vec<String>,
        default: Option<String>,
    },
    Color {
        default: Option<Color>,
        allow_none: bool,
    },
    /// A reference to an externally owned model of (a subclass of) `kind`.
    Instance {
        kind: ModelKind,
        allow_none: bool,
    },
    /// The first variant accepting a value wins. The default is the explicit
    /// one if given, else the first variant's.
    Union {
        variants: Vec<Descriptor>,
        default: Option<Value>,
    },
    Record(Arc<RecordSchema>),
    Sequence(Arc<SequenceSchema>),
    /// A schema declared by name in a [`SchemaCatalog`](crate::SchemaCatalog).
    /// Replaced by the compiled schema when the enclosing schema is built.
    Named(String),
}

impl Descriptor {
    pub fn string(default: impl Into<String>) -> Self {
        Self::Str {
            default: Some(default.into()),
        }
    }

    pub fn float(default: f64) -> Self {
        Self::Float {
            default: Some(default),
            allow_none: false,
        }
    }

    /// A float that may be absent; `None` makes absent the default.
    pub fn optional_float(default: Option<f64>) -> Self {
        Self::Float {
            default,
            allow_none: true,
        }
    }

    /// A float that must be given explicitly.
    pub fn required_float() -> Self {
        Self::Float {
            default: None,
            allow_none: false,
        }
    }

    pub fn boolean(default: bool) -> Self {
        Self::Bool {
            default: Some(default),
        }
    }

    pub fn choice<I, S>(choices: I, default: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            choices: choices.into_iter().map(Into::into).collect(),
            default: Some(default.into()),
        }
    }

    pub fn color(default: Color) -> Self {
        Self::Color {
            default: Some(default),
            allow_none: false,
        }
    }

    pub fn optional_color(default: Option<Color>) -> Self {
        Self::Color {
            default,
            allow_none: true,
        }
    }

    /// A reference that must be set; it has no default.
    pub fn instance(kind: ModelKind) -> Self {
        Self::Instance {
            kind,
            allow_none: false,
        }
    }

    pub fn optional_instance(kind: ModelKind) -> Self {
        Self::Instance {
            kind,
            allow_none: true,
        }
    }

    pub fn union(variants: Vec<Descriptor>) -> Self {
        Self::Union {
            variants,
            default: None,
        }
    }

    pub fn record(schema: RecordSchema) -> Self {
        Self::Record(Arc::new(schema))
    }

    pub fn sequence(schema: SequenceSchema) -> Self {
        Self::Sequence(Arc::new(schema))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Replace the default of a union or scalar descriptor.
    ///
    /// The value is checked and coerced like any assigned value, so a
    /// default the descriptor would itself reject is an error here. References
    /// and composite descriptors have no explicit default to replace.
    pub fn with_default(self, value: impl Into<Value>) -> Result<Self, SchemaError> {
        if let Self::Instance { .. } | Self::Record(_) | Self::Sequence(_) | Self::Named(_) = self {
            return Err(SchemaError::InvalidDefault {
                reason: format!("a {} slot takes no explicit default", self.kind_name()),
            });
        }
        let value = self
            .validate("default", value.into())
            .map_err(|err| SchemaError::InvalidDefault {
                reason: err.to_string(),
            })?;
        Ok(match self {
            Self::Union { variants, .. } => Self::Union {
                variants,
                default: Some(value),
            },
            Self::Str { .. } => Self::Str {
                default: value.as_str().map(str::to_string),
            },
            Self::Float { allow_none, .. } => Self::Float {
                default: value.as_f64(),
                allow_none,
            },
            Self::Bool { .. } => Self::Bool {
                default: value.as_bool(),
            },
            Self::Enum { choices, .. } => Self::Enum {
                choices,
                default: value.as_str().map(str::to_string),
            },
            Self::Color { allow_none, .. } => Self::Color {
                default: value.as_str().and_then(|s| Color::parse(s).ok()),
                allow_none,
            },
            other => other,
        })
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Str { .. } => "string",
            Self::Float { .. } => "float",
            Self::Bool { .. } => "bool",
            Self::Enum { .. } => "choice",
            Self::Color { .. } => "color",
            Self::Instance { .. } => "reference",
            Self::Union { .. } => "union",
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Named(_) => "named schema",
        }
    }

    /// Whether [`Value::Absent`] is an acceptable value.
    pub fn allows_absent(&self) -> bool {
        match self {
            Self::Float { allow_none, .. }
            | Self::Color { allow_none, .. }
            | Self::Instance { allow_none, .. } => *allow_none,
            Self::Union { variants, .. } => variants.iter().any(Self::allows_absent),
            _ => false,
        }
    }

    /// The value this slot starts out with.
    ///
    /// Composite descriptors hand out their derived default, so the result
    /// is always a plain value tree. `Named` descriptors have to be compiled
    /// through a catalog first.
    pub fn default_value(&self) -> Result<Value, SchemaError> {
        match self {
            Self::Str { default } => default
                .clone()
                .map(Value::Str)
                .ok_or_else(SchemaError::missing_default),
            Self::Float {
                default,
                allow_none,
            } => nullable_default(default.map(Value::Float), *allow_none),
            Self::Bool { default } => default
                .map(Value::Bool)
                .ok_or_else(SchemaError::missing_default),
            Self::Enum { choices, default } => default
                .as_ref()
                .filter(|d| choices.contains(d))
                .map(|d| Value::Str(d.clone()))
                .ok_or_else(SchemaError::missing_default),
            Self::Color {
                default,
                allow_none,
            } => nullable_default(default.clone().map(Value::from), *allow_none),
            Self::Instance { allow_none, .. } => nullable_default(None, *allow_none),
            Self::Union { variants, default } => match (default, variants.first()) {
                (Some(value), _) => Ok(value.clone()),
                (None, Some(first)) => first.default_value(),
                (None, None) => Err(SchemaError::missing_default()),
            },
            Self::Record(schema) => Ok(schema.default_value()),
            Self::Sequence(schema) => Ok(schema.default_value()),
            Self::Named(name) => Err(SchemaError::UnknownSchema(name.clone())),
        }
    }

    /// Check `value` against this descriptor, returning the coerced value.
    ///
    /// `field` is the path reported in errors.
    pub fn validate(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        if value.is_absent() {
            return if self.allows_absent() {
                Ok(Value::Absent)
            } else {
                Err(ValidationError::NotNullable {
                    field: field.to_string(),
                })
            };
        }
        let wrong_type = |expected: &'static str, found: &Value| ValidationError::WrongType {
            field: field.to_string(),
            expected,
            found: found.kind_name(),
        };
        match self {
            Self::Str { .. } => match value {
                Value::Str(_) => Ok(value),
                other => Err(wrong_type("string", &other)),
            },
            Self::Float { .. } => {
                let number = match &value {
                    Value::Float(f) => Some(*f),
                    Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                    Value::Str(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                // NaN and the infinities have no JSON form.
                match number {
                    Some(f) if f.is_finite() => Ok(Value::Float(f)),
                    _ => Err(wrong_type("finite float", &value)),
                }
            }
            Self::Bool { .. } => match value {
                Value::Bool(_) => Ok(value),
                other => Err(wrong_type("bool", &other)),
            },
            Self::Enum { choices, .. } => match value {
                Value::Str(s) if choices.contains(&s) => Ok(Value::Str(s)),
                Value::Str(s) => Err(ValidationError::InvalidChoice {
                    field: field.to_string(),
                    value: s,
                    choices: choices.clone(),
                }),
                other => Err(wrong_type("string", &other)),
            },
            Self::Color { .. } => match value {
                Value::Str(s) => Color::parse(&s).map(Value::from).map_err(|source| {
                    ValidationError::InvalidColor {
                        field: field.to_string(),
                        source,
                    }
                }),
                other => Err(wrong_type("color string", &other)),
            },
            Self::Instance { kind, .. } => match value {
                Value::Ref(r) if r.kind.is_a(*kind) => Ok(Value::Ref(r)),
                Value::Ref(r) => Err(ValidationError::WrongModelKind {
                    field: field.to_string(),
                    expected: *kind,
                    found: r.kind,
                }),
                // Inbound state carries references in their wire form.
                Value::Str(wire) => ModelRef::from_wire(&wire, *kind)
                    .map(Value::Ref)
                    .map_err(|source| ValidationError::BadReference {
                        field: field.to_string(),
                        source,
                    }),
                other => Err(wrong_type("model reference", &other)),
            },
            Self::Union { variants, .. } => variants
                .iter()
                .find_map(|v| v.validate(field, value.clone()).ok())
                .ok_or_else(|| ValidationError::NoVariant {
                    field: field.to_string(),
                }),
            Self::Record(schema) => schema.validate(field, value),
            Self::Sequence(schema) => schema.validate(field, value),
            Self::Named(name) => Err(ValidationError::Unresolved {
                field: field.to_string(),
                name: name.clone(),
            }),
        }
    }
}

fn nullable_default(default: Option<Value>, allow_none: bool) -> Result<Value, SchemaError> {
    match default {
        Some(value) => Ok(value),
        None if allow_none => Ok(Value::Absent),
        None => Err(SchemaError::missing_default()),
    }
}

/// Path of a record entry below `parent`.
pub(crate) fn key_path(parent: &str, key: &str) -> String {
    join_path(parent, key)
}

/// Path of a sequence element below `parent`.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    join_path(parent, &format!("[{index}]"))
}
