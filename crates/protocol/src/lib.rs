//! Vocabulary shared with the browser side of the widgets: which frontend
//! model a widget pairs with, how references to other models travel, and
//! which color strings the frontend accepts.

pub mod color;
pub mod identity;
pub mod reference;

pub use color::{BLACK, BLUE, Color, ColorError, GREEN, LIGHT_GRAY, MID_GRAY, RED};
pub use identity::{MODULE_NAME, MODULE_VERSION, ModelIdentity};
pub use reference::{MODEL_REF_PREFIX, ModelKind, ModelRef, ReferenceError};
