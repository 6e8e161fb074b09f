//! Typed style records, one per nesting level, each able to produce the
//! schema whose defaults are its own values.

pub mod axis;
pub mod grid;

pub use axis::{AxisStyle, TickDirection, TickStyle};
pub use grid::{GridLines, GridStyle, GridlineStyle, LineStyle};
