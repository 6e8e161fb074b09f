//! Kernel-side models of the threeplot widgets.
//!
//! Styles are typed records ([`GridStyle`], [`AxisStyle`], ...) whose
//! `schema()` turns their current values into schema defaults. Widgets
//! combine them with scale references and display attributes, and declare
//! their fields once in a [`FieldRegistry`].

pub mod convert;
pub mod registry;
pub mod styles;
pub mod widgets;

pub use convert::{FromValue, ToValue};
pub use registry::{FieldRegistry, FieldRegistryBuilder, FieldSpec, RegistryError};
pub use styles::{
    AxisStyle, GridLines, GridStyle, GridlineStyle, LineStyle, TickDirection, TickStyle,
};
pub use widgets::{
    AutosizeAxes, AutosizeMode, AxesCross, CylindricalGrid, GridCross, LinearScale, Widget,
};
