// Frequency-domain spectrum synthesis
//
// Generates the simulated post-transform spectrum for a leak class: a decaying
// broadband floor plus the class's Gaussian peak set, mapped to dB. Spectral
// overlap between classes is intentional; the demo's point is that frequency
// content alone does not separate them.

use rand::Rng;

use crate::catalog::LeakClass;
use crate::config::SynthesisConfig;
use crate::synth::shapes::{gaussian, shape_for};

/// One point of a synthesized spectrum
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpectrumPoint {
    pub frequency_khz: f32,
    pub magnitude_db: f32,
}

/// Broadband floor level before the exponential falloff
const FLOOR_LEVEL: f32 = 0.20;
/// Falloff constant of the broadband floor, kHz
const FLOOR_FALLOFF_KHZ: f32 = 4.0;
/// Peak-to-peak amplitude of the floor jitter
const FLOOR_NOISE: f32 = 0.12;
/// dB mapping: `magnitude_db = DB_OFFSET + linear * DB_RANGE`
const DB_OFFSET: f32 = -40.0;
const DB_RANGE: f32 = 60.0;

/// Synthesize a spectrum for a leak class
///
/// Returns exactly `config.spectrum_len` points spanning 0 to
/// `config.band_max_khz`, ordered by frequency. Magnitudes follow the linear
/// formula mapped through the dB offset; no hard clamp is applied.
pub fn synthesize_spectrum(class: LeakClass, config: &SynthesisConfig) -> Vec<SpectrumPoint> {
    let shape = shape_for(class);
    let mut rng = rand::thread_rng();
    let points = config.spectrum_len;

    let mut data = Vec::with_capacity(points);
    for i in 0..points {
        let freq_khz = (i as f32 / points as f32) * config.band_max_khz;

        let floor =
            FLOOR_LEVEL * (-freq_khz / FLOOR_FALLOFF_KHZ).exp() + rng.gen::<f32>() * FLOOR_NOISE;
        let peak_mix: f32 = shape
            .peaks
            .iter()
            .map(|peak| gaussian(freq_khz, peak.center_khz, peak.width_khz) * peak.gain)
            .sum();

        let linear = floor * shape.broadband_gain + peak_mix;

        data.push(SpectrumPoint {
            frequency_khz: freq_khz,
            magnitude_db: DB_OFFSET + linear * DB_RANGE,
        });
    }

    data
}
