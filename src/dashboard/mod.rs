//! Dashboard Assembly
//!
//! The reactive side of the application: a parameter object holding the
//! three user-adjustable values, and the composer that regenerates the
//! chart overlay whenever one of them changes.

pub mod params;
pub mod view;

pub use params::{ParamError, ParamPatch, SineWaveParams, SAMPLES_MAX, SAMPLES_MIN, YEAR_MAX, YEAR_MIN};
pub use view::ViewComposer;
