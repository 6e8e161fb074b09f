use serde::{Serialize, Serializer};
use thiserror::Error;

/// Prefix the widget manager uses for serialized model references.
pub const MODEL_REF_PREFIX: &str = "IPY_MODEL_";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("{0:?} is not a model reference (expected IPY_MODEL_<id>)")]
    MissingPrefix(String),
    #[error("model reference has an empty id")]
    EmptyId,
}

/// Class of an externally owned model a reference may point at.
///
/// These objects live in other widget libraries (scales, the 3D scene graph);
/// only their class matters here, for reference validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelKind {
    /// Any continuous scale model, linear scales included.
    ContinuousScale,
    Object3D,
    /// Scenes are 3D objects.
    Scene,
    /// Cameras are 3D objects.
    Camera,
}

impl ModelKind {
    /// Whether a model of this kind is accepted where `ancestor` is expected.
    pub fn is_a(self, ancestor: ModelKind) -> bool {
        self == ancestor
            || matches!(
                (self, ancestor),
                (ModelKind::Scene | ModelKind::Camera, ModelKind::Object3D)
            )
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContinuousScale => write!(f, "ContinuousScale"),
            Self::Object3D => write!(f, "Object3D"),
            Self::Scene => write!(f, "Scene"),
            Self::Camera => write!(f, "Camera"),
        }
    }
}

/// An opaque handle to a model owned by the widget manager.
///
/// Never inspected beyond its kind; it serializes the way widget references
/// travel over the comm channel: `"IPY_MODEL_<model_id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    pub model_id: String,
    pub kind: ModelKind,
}

impl ModelRef {
    pub fn new(model_id: impl Into<String>, kind: ModelKind) -> Self {
        Self {
            model_id: model_id.into(),
            kind,
        }
    }

    /// Rebuild a reference from its wire form. The kind is not part of the
    /// wire form, so the receiving field supplies it.
    pub fn from_wire(wire: &str, kind: ModelKind) -> Result<Self, ReferenceError> {
        let id = wire
            .strip_prefix(MODEL_REF_PREFIX)
            .ok_or_else(|| ReferenceError::MissingPrefix(wire.to_string()))?;
        if id.is_empty() {
            return Err(ReferenceError::EmptyId);
        }
        Ok(Self::new(id, kind))
    }

    pub fn to_wire(&self) -> String {
        format!("{MODEL_REF_PREFIX}{}", self.model_id)
    }
}

impl Serialize for ModelRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_roundtrips() {
        let r = ModelRef::new("abc123", ModelKind::ContinuousScale);
        assert_eq!(r.to_wire(), "IPY_MODEL_abc123");
        assert_eq!(
            ModelRef::from_wire("IPY_MODEL_abc123", ModelKind::ContinuousScale),
            Ok(r)
        );
    }

    #[test]
    fn rejects_malformed_wire_refs() {
        assert_eq!(
            ModelRef::from_wire("abc123", ModelKind::Scene),
            Err(ReferenceError::MissingPrefix("abc123".to_string()))
        );
        assert_eq!(
            ModelRef::from_wire("IPY_MODEL_", ModelKind::Scene),
            Err(ReferenceError::EmptyId)
        );
    }

    #[test]
    fn scene_and_camera_are_objects() {
        assert!(ModelKind::Scene.is_a(ModelKind::Object3D));
        assert!(ModelKind::Camera.is_a(ModelKind::Object3D));
        assert!(!ModelKind::Object3D.is_a(ModelKind::Scene));
        assert!(!ModelKind::ContinuousScale.is_a(ModelKind::Object3D));
    }

    #[test]
    fn serializes_as_wire_string() {
        let r = ModelRef::new("k", ModelKind::Camera);
        assert_eq!(serde_json::to_string(&r).unwrap_or_default(), "\"IPY_MODEL_k\"");
    }
}
