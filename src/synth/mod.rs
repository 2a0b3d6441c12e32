//! Synthetic Data Generation
//!
//! Produces the sine-wave demo series shown on the dashboard: noisy sine
//! samples spread over a two-year date span, bucketed by day of year and
//! averaged into a single demo "season".
//!
//! - [`noise`]: deterministic Gaussian noise source
//! - [`series`]: sampling, day-of-year bucketing, cumulative transform

pub mod noise;
pub mod series;

pub use noise::NoiseSource;
pub use series::{synthetic_year, DailySeries, SeriesPoint, SynthError};

/// Scale offset applied to the non-cumulative view, so noise amplitude stays
/// proportional to the year offset rather than the absolute year number.
pub const SCALE_OFFSET: i32 = 2000;
