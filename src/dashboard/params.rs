//! Reactive Parameters
//!
//! The dashboard's user-adjustable values. A [`ParamPatch`] carries a
//! partial update pushed from the browser; applying it reports whether
//! anything actually changed, which is what gates chart recomputation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DashboardConfig;

/// Smallest accepted sample count; a curve needs two points.
pub const SAMPLES_MIN: usize = 2;
/// Largest accepted sample count.
pub const SAMPLES_MAX: usize = 20_000;
/// First selectable year.
pub const YEAR_MIN: i32 = 2000;
/// Last selectable year.
pub const YEAR_MAX: i32 = 2019;

/// The three user-adjustable dashboard parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SineWaveParams {
    /// Sample count spread over the generated span
    pub samples: usize,
    /// Reference year highlighted on the chart
    pub year: i32,
    /// Plot running totals instead of daily means
    pub cumulative: bool,
}

/// A partial update to [`SineWaveParams`]; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ParamPatch {
    pub samples: Option<usize>,
    pub year: Option<i32>,
    pub cumulative: Option<bool>,
}

/// Parameter validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("samples must be between {SAMPLES_MIN} and {SAMPLES_MAX}, got {0}")]
    SamplesOutOfRange(usize),

    #[error("year must be between {YEAR_MIN} and {YEAR_MAX}, got {0}")]
    YearOutOfRange(i32),
}

impl SineWaveParams {
    /// Create validated parameters.
    pub fn new(samples: usize, year: i32, cumulative: bool) -> Result<Self, ParamError> {
        validate_samples(samples)?;
        validate_year(year)?;
        Ok(Self {
            samples,
            year,
            cumulative,
        })
    }

    /// Initial parameters from configuration. Out-of-range configured values
    /// fall back to the built-in defaults with a warning rather than failing
    /// the whole dashboard.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let samples = match validate_samples(config.default_samples) {
            Ok(()) => config.default_samples,
            Err(e) => {
                tracing::warn!("Configured default_samples rejected: {e}; using 200");
                200
            }
        };
        let year = match validate_year(config.default_year) {
            Ok(()) => config.default_year,
            Err(e) => {
                tracing::warn!("Configured default_year rejected: {e}; using 2017");
                2017
            }
        };

        Self {
            samples,
            year,
            cumulative: config.default_cumulative,
        }
    }

    /// Apply a partial update. Returns `true` if any value changed.
    ///
    /// The patch is validated as a whole before anything is written, so a
    /// rejected patch leaves the parameters untouched.
    pub fn apply(&mut self, patch: &ParamPatch) -> Result<bool, ParamError> {
        if let Some(samples) = patch.samples {
            validate_samples(samples)?;
        }
        if let Some(year) = patch.year {
            validate_year(year)?;
        }

        let mut changed = false;
        if let Some(samples) = patch.samples {
            changed |= self.samples != samples;
            self.samples = samples;
        }
        if let Some(year) = patch.year {
            changed |= self.year != year;
            self.year = year;
        }
        if let Some(cumulative) = patch.cumulative {
            changed |= self.cumulative != cumulative;
            self.cumulative = cumulative;
        }

        Ok(changed)
    }
}

fn validate_samples(samples: usize) -> Result<(), ParamError> {
    if !(SAMPLES_MIN..=SAMPLES_MAX).contains(&samples) {
        return Err(ParamError::SamplesOutOfRange(samples));
    }
    Ok(())
}

fn validate_year(year: i32) -> Result<(), ParamError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(ParamError::YearOutOfRange(year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SineWaveParams {
        SineWaveParams::new(200, 2017, false).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            SineWaveParams::new(1, 2017, false),
            Err(ParamError::SamplesOutOfRange(1))
        );
        assert_eq!(
            SineWaveParams::new(200, 1999, false),
            Err(ParamError::YearOutOfRange(1999))
        );
        assert_eq!(
            SineWaveParams::new(200, 2020, false),
            Err(ParamError::YearOutOfRange(2020))
        );
    }

    #[test]
    fn test_apply_reports_change() {
        let mut params = base();
        let patch = ParamPatch {
            year: Some(2012),
            ..Default::default()
        };

        assert_eq!(params.apply(&patch), Ok(true));
        assert_eq!(params.year, 2012);
        assert_eq!(params.samples, 200);
    }

    #[test]
    fn test_apply_same_values_is_a_noop() {
        let mut params = base();
        let patch = ParamPatch {
            samples: Some(200),
            year: Some(2017),
            cumulative: Some(false),
        };

        assert_eq!(params.apply(&patch), Ok(false));
    }

    #[test]
    fn test_rejected_patch_leaves_params_untouched() {
        let mut params = base();
        let patch = ParamPatch {
            samples: Some(50),
            year: Some(3000),
            cumulative: Some(true),
        };

        assert_eq!(params.apply(&patch), Err(ParamError::YearOutOfRange(3000)));
        assert_eq!(params, base());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut params = base();
        assert_eq!(params.apply(&ParamPatch::default()), Ok(false));
        assert_eq!(params, base());
    }

    #[test]
    fn test_from_config_falls_back_on_bad_values() {
        let config = crate::config::DashboardConfig {
            default_samples: 0,
            default_year: 1850,
            default_cumulative: true,
            ..Default::default()
        };

        let params = SineWaveParams::from_config(&config);
        assert_eq!(params.samples, 200);
        assert_eq!(params.year, 2017);
        assert!(params.cumulative);
    }

    #[test]
    fn test_patch_deserializes_partially() {
        let patch: ParamPatch = serde_json::from_str(r#"{"year": 2005}"#).unwrap();
        assert_eq!(patch.year, Some(2005));
        assert_eq!(patch.samples, None);
        assert_eq!(patch.cumulative, None);
    }
}
