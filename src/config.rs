//! Configuration for synthesis dimensions and pipeline timing
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling timing and dimension tweaks without recompilation. Stage delays
//! are absolute offsets from pipeline start; they are configuration, not
//! hardwired constants, so a presentation layer can retime the animation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Complete demo engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    pub synthesis: SynthesisConfig,
    pub pipeline: PipelineConfig,
}

/// Signal synthesis dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Number of waveform points per generated trace
    pub waveform_len: usize,
    /// Simulated capture duration in seconds
    pub duration_s: f32,
    /// Pressure scale applied to the normalized waveform (Pa)
    pub amplitude_scale: f32,
    /// Number of spectrum points across the band
    pub spectrum_len: usize,
    /// Upper edge of the analysis band in kHz (band starts at 0)
    pub band_max_khz: f32,
    /// Time bins of the time-frequency grid
    pub time_bins: usize,
    /// Frequency bins of the time-frequency grid
    pub freq_bins: usize,
    /// Width of the sliding classifier window, in time bins
    pub window_width: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            waveform_len: 400,
            duration_s: 2.0,
            amplitude_scale: 0.2,
            spectrum_len: 256,
            band_max_khz: 8.0,
            time_bins: 40,
            freq_bins: 64,
            window_width: 4,
        }
    }
}

/// Pipeline stage timing, in milliseconds from run start
///
/// The seven-stage schedule staggers the two grid profiles and their
/// difference; the collapsed five-stage schedule is the original demo's
/// 500/2000/3500/5000 sequence (see `StagePlan::five_stage`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Offset of the raw waveform stage
    pub stage_delay_raw_ms: u64,
    /// Offset of the frequency spectrum stage
    pub stage_delay_spectrum_ms: u64,
    /// Offset of the baseline-profile grid stage
    pub stage_delay_baseline_ms: u64,
    /// Offset of the sharp-profile grid stage
    pub stage_delay_sharp_ms: u64,
    /// Offset of the difference grid stage
    pub stage_delay_difference_ms: u64,
    /// Offset of the first sliding-window position
    pub stage_delay_sliding_start_ms: u64,
    /// Interval between sliding-window positions
    pub sliding_tick_ms: u64,
    /// Settle delay between the last window position and Complete
    pub final_settle_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_delay_raw_ms: 500,
            stage_delay_spectrum_ms: 2000,
            stage_delay_baseline_ms: 3500,
            // Sharp trails baseline by 1500ms so the two grids read as a pair
            stage_delay_sharp_ms: 5000,
            stage_delay_difference_ms: 6500,
            stage_delay_sliding_start_ms: 8000,
            sliding_tick_ms: 150,
            final_settle_ms: 500,
        }
    }
}

impl PipelineConfig {
    pub fn stage_delay_raw(&self) -> Duration {
        Duration::from_millis(self.stage_delay_raw_ms)
    }

    pub fn stage_delay_spectrum(&self) -> Duration {
        Duration::from_millis(self.stage_delay_spectrum_ms)
    }

    pub fn stage_delay_baseline(&self) -> Duration {
        Duration::from_millis(self.stage_delay_baseline_ms)
    }

    pub fn stage_delay_sharp(&self) -> Duration {
        Duration::from_millis(self.stage_delay_sharp_ms)
    }

    pub fn stage_delay_difference(&self) -> Duration {
        Duration::from_millis(self.stage_delay_difference_ms)
    }

    pub fn stage_delay_sliding_start(&self) -> Duration {
        Duration::from_millis(self.stage_delay_sliding_start_ms)
    }

    pub fn sliding_tick(&self) -> Duration {
        Duration::from_millis(self.sliding_tick_ms)
    }

    pub fn final_settle(&self) -> Duration {
        Duration::from_millis(self.final_settle_ms)
    }
}

impl Default for DemoConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or defaults if the file is missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }
}
