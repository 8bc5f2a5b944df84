// Time-domain waveform synthesis
//
// Generates the simulated raw hydrophone trace for a leak class: a shared
// broadband turbulent base plus the class's carrier mix under its temporal
// modulation, scaled to pressure units. Structure is deterministic per class;
// the additive noise is fresh on every call and is not reproducible.

use rand::Rng;
use std::f32::consts::PI;

use crate::catalog::LeakClass;
use crate::config::SynthesisConfig;
use crate::synth::shapes::shape_for;

/// One point of a synthesized waveform trace
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveformPoint {
    /// Time into the trace, seconds
    pub time_s: f32,
    /// Simulated acoustic pressure, Pa
    pub amplitude: f32,
}

/// Amplitude of the shared low-frequency swell
const BASE_SWELL_AMPLITUDE: f32 = 0.15;
/// Cycle multiplier of the shared low-frequency swell
const BASE_SWELL_RATE: f32 = 15.0;
/// Peak-to-peak amplitude of the broadband noise term
const BASE_NOISE_AMPLITUDE: f32 = 0.35;

/// Synthesize a waveform trace for a leak class
///
/// Returns exactly `config.waveform_len` points spanning `config.duration_s`
/// seconds, ordered by time. Amplitudes stay within roughly
/// `[-1, 1] * config.amplitude_scale`.
pub fn synthesize_waveform(class: LeakClass, config: &SynthesisConfig) -> Vec<WaveformPoint> {
    let shape = shape_for(class);
    let mut rng = rand::thread_rng();
    let samples = config.waveform_len;

    let mut data = Vec::with_capacity(samples);
    for i in 0..samples {
        // Normalized position in the trace; carriers are parameterized over it
        let t = i as f32 / samples as f32;

        let swell = (t * PI * BASE_SWELL_RATE).sin() * BASE_SWELL_AMPLITUDE;
        let noise = (rng.gen::<f32>() - 0.5) * BASE_NOISE_AMPLITUDE;
        let base = swell + noise;

        let modulation = shape.waveform_modulation.value(t);
        let carrier_mix: f32 = shape
            .carriers
            .iter()
            .map(|&(rate, amp)| (t * PI * rate).sin() * amp)
            .sum();

        let amplitude = base * shape.waveform_base_gain + carrier_mix * modulation;

        data.push(WaveformPoint {
            time_s: t * config.duration_s,
            amplitude: amplitude * config.amplitude_scale,
        });
    }

    data
}
