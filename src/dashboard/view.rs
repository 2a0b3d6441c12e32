//! Chart Composition
//!
//! Builds the chart overlay for a parameter set: one muted background curve
//! per reference-period year, then the selected year highlighted on top.

use crate::chart::{palette, ChartError, Curve, Overlay, Palette};
use crate::config::DashboardConfig;
use crate::dashboard::params::SineWaveParams;
use crate::synth::{synthetic_year, DailySeries, SynthError, SCALE_OFFSET};

/// Background curve color
const BAND_COLOR: &str = "grey";
/// Fallback reference color if the palette is too short
const REF_COLOR: &str = "#d62728";
/// Divisor applied to cumulative sums
const CUMULATIVE_DIVISOR: f64 = 1000.0;

/// Composes the dashboard overlay from the current parameters.
///
/// Construction resolves everything that does not depend on the reactive
/// parameters (labels, reference period, palette, seed), so recomputation
/// is a pure function of the parameter object.
#[derive(Debug, Clone)]
pub struct ViewComposer {
    chart_title: String,
    value_label: String,
    reference_period: [i32; 2],
    noise_seed: u64,
    palette: &'static Palette,
}

impl ViewComposer {
    /// Build a composer from the dashboard configuration.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ChartError> {
        Ok(Self {
            chart_title: config.chart_title.clone(),
            value_label: config.value_label.clone(),
            reference_period: config.reference_period,
            noise_seed: config.noise_seed,
            palette: palette(&config.palette)?,
        })
    }

    /// Compose the overlay for a parameter set.
    pub fn overlay(&self, params: &SineWaveParams) -> Result<Overlay, SynthError> {
        let mut overlay = Overlay::new(&self.chart_title, &self.value_label);

        let [start, end] = self.reference_period;
        let band_label = format!("{}-{}", start, end);
        for year in start..end {
            let series = self.series_for(year, params)?;
            overlay.push(
                Curve::from_series(&series, &band_label)
                    .color(BAND_COLOR)
                    .width(0.8)
                    .muted(true),
            );
        }

        // The selected year renders last so it sits on top of the band
        let series = self.series_for(params.year, params)?;
        overlay.push(
            Curve::from_series(&series, params.year.to_string())
                .color(self.reference_color())
                .width(2.0),
        );

        Ok(overlay)
    }

    fn series_for(&self, year: i32, params: &SineWaveParams) -> Result<DailySeries, SynthError> {
        if params.cumulative {
            let series = synthetic_year(year, params.samples, 0, self.noise_seed)?;
            Ok(series.cumulative(CUMULATIVE_DIVISOR))
        } else {
            synthetic_year(year, params.samples, SCALE_OFFSET, self.noise_seed)
        }
    }

    fn reference_color(&self) -> &'static str {
        self.palette.colors.get(1).copied().unwrap_or(REF_COLOR)
    }
}
