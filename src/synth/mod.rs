// Signal synthesis - deterministic per-class artifact generation
//
// Pure functions mapping (leak class, dimensions) to the demo's synthetic
// artifacts: time-domain waveform, frequency-domain spectrum, and
// time-frequency intensity grids under two resolution profiles, plus the
// signed difference between two grids. Structure is a fixed per-class lookup
// (shapes); only the additive jitter varies between calls.

pub mod grid;
pub mod shapes;
pub mod spectrogram;
pub mod spectrum;
pub mod waveform;

pub use grid::{compute_difference, DifferenceGrid, TimeFrequencyGrid};
pub use spectrogram::{band_energy_fraction, synthesize_time_frequency, ResolutionProfile};
pub use spectrum::{synthesize_spectrum, SpectrumPoint};
pub use waveform::{synthesize_waveform, WaveformPoint};
