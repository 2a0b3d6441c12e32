//! Chart Overlay
//!
//! A composed visual object combining multiple plotted curves with shared
//! axis and styling options. Serialized to JSON for the browser renderer.

use serde::Serialize;

use crate::synth::DailySeries;

/// One plotted curve.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Curve {
    /// Legend label
    pub label: String,
    /// Line color (hex or CSS color name)
    pub color: String,
    /// Line width in pixels
    pub width: f64,
    /// Muted curves render at reduced opacity behind the reference curve
    pub muted: bool,
    /// Day-of-year x positions, ascending
    pub days: Vec<u32>,
    /// Values, one per day entry
    pub values: Vec<f64>,
}

impl Curve {
    /// Build a curve from a bucketed series.
    pub fn from_series(series: &DailySeries, label: impl Into<String>) -> Self {
        let (days, values) = series
            .points()
            .iter()
            .map(|p| (p.day_of_year, p.value))
            .unzip();

        Self {
            label: label.into(),
            color: "black".to_string(),
            width: 0.8,
            muted: false,
            days,
            values,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

/// Axis labels and formatting.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisOptions {
    pub x_label: String,
    pub y_label: String,
    /// printf-style tick format for the y axis
    pub y_format: String,
    /// Lower y bound; the upper bound autoranges
    pub y_min: Option<f64>,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            x_label: "Month".to_string(),
            y_label: String::new(),
            y_format: "%.2f".to_string(),
            y_min: Some(0.0),
        }
    }
}

/// Figure-level styling defaults.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FigureOptions {
    /// Width-to-height aspect ratio
    pub aspect: f64,
    pub bgcolor: String,
    pub font_scale: f64,
    pub legend_position: String,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            aspect: 2.0,
            bgcolor: "white".to_string(),
            font_scale: 1.2,
            legend_position: "top".to_string(),
        }
    }
}

/// A composed chart: shared options plus a stack of curves.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overlay {
    pub title: String,
    pub axes: AxisOptions,
    pub figure: FigureOptions,
    pub curves: Vec<Curve>,
}

impl Overlay {
    /// Create an empty overlay with default styling.
    pub fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            axes: AxisOptions {
                y_label: y_label.into(),
                ..AxisOptions::default()
            },
            figure: FigureOptions::default(),
            curves: Vec::new(),
        }
    }

    /// Append a curve; curves render in insertion order, so muted background
    /// curves should be pushed before the reference curve.
    pub fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }
}
