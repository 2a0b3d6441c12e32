//! Deterministic Gaussian Noise
//!
//! Small self-contained generator for the demo data: a SplitMix64 stream
//! fed through the Box-Muller transform. Seeding it from the configuration
//! and the current parameters makes every recomputation of the chart
//! reproducible, which also keeps the tests exact.

/// Deterministic pseudo-random noise source.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u64,
    /// Box-Muller produces values in pairs; the second is held here.
    spare: Option<f64>,
}

impl NoiseSource {
    /// Create a noise source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed,
            spare: None,
        }
    }

    /// Derive a stream seed from a base seed and the parameters that shape
    /// a series, so distinct parameter sets get distinct noise streams.
    pub fn stream_seed(base: u64, year: i32, samples: usize) -> u64 {
        let mut h = base ^ 0x9e37_79b9_7f4a_7c15;
        h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9) ^ (year as u64).wrapping_shl(17);
        h = h.wrapping_mul(0x94d0_49bb_1331_11eb) ^ samples as u64;
        h
    }

    /// Next raw 64-bit value (SplitMix64).
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Next uniform value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // 53 mantissa bits of uniform randomness
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Next normally distributed value with mean 0 and the given standard
    /// deviation (Box-Muller).
    pub fn next_normal(&mut self, std_dev: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return z * std_dev;
        }

        // u1 must be in (0, 1] for the log
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();

        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * u2;

        self.spare = Some(radius * angle.sin());
        radius * angle.cos() * std_dev
    }
}
