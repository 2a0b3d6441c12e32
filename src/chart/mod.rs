//! Chart Model
//!
//! Declarative description of the dashboard chart: curves, axes, figure
//! styling and color palettes. The [`Overlay`] type serializes to JSON and
//! is what the browser-side canvas renderer consumes.

pub mod overlay;
pub mod palette;

pub use overlay::{AxisOptions, Curve, FigureOptions, Overlay};
pub use palette::{palette, palette_names, Palette};

use thiserror::Error;

/// Errors from the chart layer
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Unknown palette '{name}'. Try: '{available}'")]
    UnknownPalette { name: String, available: String },
}
