// Time-frequency grids and difference computation
//
// Dense row-major grids indexed by (time_bin, freq_bin). Intensity grids are
// clamped to [0, 100]; difference grids are signed and unclamped. Out-of-range
// lookups read as zero intensity, matching how the heatmap renderer treats
// missing cells.

use crate::error::SynthesisError;

/// Intensity clamp bounds for synthesized grids
pub const INTENSITY_MIN: f32 = 0.0;
pub const INTENSITY_MAX: f32 = 100.0;

/// Dense time-frequency intensity grid
///
/// Invariant: every in-range `(time_bin, freq_bin)` pair has exactly one
/// value in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeFrequencyGrid {
    time_bins: usize,
    freq_bins: usize,
    values: Vec<f32>,
}

impl TimeFrequencyGrid {
    /// Create a zeroed grid
    pub fn new(time_bins: usize, freq_bins: usize) -> Self {
        Self {
            time_bins,
            freq_bins,
            values: vec![0.0; time_bins * freq_bins],
        }
    }

    /// Grid dimensions as `(time_bins, freq_bins)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.time_bins, self.freq_bins)
    }

    pub fn time_bins(&self) -> usize {
        self.time_bins
    }

    pub fn freq_bins(&self) -> usize {
        self.freq_bins
    }

    /// Intensity at `(time_bin, freq_bin)`; out-of-range reads as 0.0
    pub fn get(&self, time_bin: usize, freq_bin: usize) -> f32 {
        if time_bin >= self.time_bins || freq_bin >= self.freq_bins {
            return 0.0;
        }
        self.values[time_bin * self.freq_bins + freq_bin]
    }

    /// Set intensity at `(time_bin, freq_bin)`, clamped to [0, 100]
    ///
    /// Out-of-range writes are a caller bug and panic in debug builds.
    pub fn set(&mut self, time_bin: usize, freq_bin: usize, intensity: f32) {
        debug_assert!(
            time_bin < self.time_bins && freq_bin < self.freq_bins,
            "grid write out of range: ({}, {}) in {}x{}",
            time_bin,
            freq_bin,
            self.time_bins,
            self.freq_bins
        );
        if time_bin < self.time_bins && freq_bin < self.freq_bins {
            self.values[time_bin * self.freq_bins + freq_bin] =
                intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
        }
    }

    /// Iterate all values in row-major order
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }

    /// Sum of the intensities in one time column
    pub fn column_energy(&self, time_bin: usize) -> f32 {
        (0..self.freq_bins)
            .map(|freq_bin| self.get(time_bin, freq_bin))
            .sum()
    }

    /// Total intensity over the whole grid
    pub fn total_energy(&self) -> f32 {
        self.values.iter().sum()
    }
}

/// Signed elementwise difference of two intensity grids
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DifferenceGrid {
    time_bins: usize,
    freq_bins: usize,
    values: Vec<f32>,
}

impl DifferenceGrid {
    pub fn dimensions(&self) -> (usize, usize) {
        (self.time_bins, self.freq_bins)
    }

    /// Signed difference at `(time_bin, freq_bin)`; out-of-range reads as 0.0
    pub fn get(&self, time_bin: usize, freq_bin: usize) -> f32 {
        if time_bin >= self.time_bins || freq_bin >= self.freq_bins {
            return 0.0;
        }
        self.values[time_bin * self.freq_bins + freq_bin]
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.values.iter().copied()
    }
}

/// Compute the elementwise difference `a - b`
///
/// Visualizes the incremental energy the sharp profile resolves over the
/// baseline profile. Output is signed and unclamped.
///
/// # Returns
/// * `Ok(DifferenceGrid)` - difference with the shared dimensions
/// * `Err(SynthesisError::DimensionMismatch)` - grids differ in shape
pub fn compute_difference(
    a: &TimeFrequencyGrid,
    b: &TimeFrequencyGrid,
) -> Result<DifferenceGrid, SynthesisError> {
    if a.dimensions() != b.dimensions() {
        return Err(SynthesisError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let values = a
        .values
        .iter()
        .zip(b.values.iter())
        .map(|(&x, &y)| x - y)
        .collect();

    Ok(DifferenceGrid {
        time_bins: a.time_bins,
        freq_bins: a.freq_bins,
        values,
    })
}
