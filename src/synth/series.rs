//! Series Generation
//!
//! Builds the dashboard's demo series: noisy sine samples spread over a
//! two-year date span, restricted to the selected year's window, bucketed
//! by day of year and averaged per bucket.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

use super::noise::NoiseSource;

/// One bucketed point of a generated series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Day of year, 1-based (Jan 1 = 1)
    pub day_of_year: u32,
    /// Mean of all samples that fell into this bucket
    pub value: f64,
}

/// A series of per-day values in ascending day-of-year order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    points: Vec<SeriesPoint>,
}

impl DailySeries {
    /// The bucketed points, ascending by day of year.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Running-sum view of the series, each value divided by `divisor`.
    pub fn cumulative(&self, divisor: f64) -> DailySeries {
        let mut total = 0.0;
        let points = self
            .points
            .iter()
            .map(|p| {
                total += p.value;
                SeriesPoint {
                    day_of_year: p.day_of_year,
                    value: total / divisor,
                }
            })
            .collect();
        DailySeries { points }
    }
}

/// Errors from series generation
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Sample count {0} is too small; at least 2 samples are required")]
    TooFewSamples(usize),

    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}

/// Generate the synthetic series for a year.
///
/// `samples` noisy sine values are spread evenly over the two-year span
/// starting Jan 1 of `year`. Values are folded to be non-negative, samples
/// inside the window [Jan 1 `year`, Jan 1 `year+1`] get a `year/1000`
/// offset, and the windowed samples are averaged per day of year.
///
/// Noise amplitude scales with `year - scale_offset`; the stream is seeded
/// from `seed` plus the parameters, so identical inputs give identical
/// output.
pub fn synthetic_year(
    year: i32,
    samples: usize,
    scale_offset: i32,
    seed: u64,
) -> Result<DailySeries, SynthError> {
    if samples < 2 {
        return Err(SynthError::TooFewSamples(samples));
    }

    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(SynthError::InvalidYear(year))?;
    let end =
        NaiveDate::from_ymd_opt(year + 1, 12, 31).ok_or(SynthError::InvalidYear(year + 1))?;
    let window_end =
        NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or(SynthError::InvalidYear(year + 1))?;

    let span_days = (end - start).num_days();
    let scaling = (year - scale_offset) as f64;
    let noise_std = 10.0 * scaling;

    let mut noise = NoiseSource::new(NoiseSource::stream_seed(seed, year, samples));
    let mut buckets: BTreeMap<u32, (f64, u32)> = BTreeMap::new();

    for i in 0..samples {
        let frac = i as f64 / (samples - 1) as f64;
        let x = 2.0 * std::f64::consts::PI * frac;
        let g = noise.next_normal(noise_std);
        let value = (100.0 * x.sin() + g / 50.0).abs();

        let date = start + Duration::days((frac * span_days as f64).round() as i64);
        if date <= window_end {
            let entry = buckets.entry(date.ordinal()).or_insert((0.0, 0));
            entry.0 += value + year as f64 / 1000.0;
            entry.1 += 1;
        }
    }

    let points = buckets
        .into_iter()
        .map(|(day_of_year, (sum, count))| SeriesPoint {
            day_of_year,
            value: sum / count as f64,
        })
        .collect();

    Ok(DailySeries { points })
}
