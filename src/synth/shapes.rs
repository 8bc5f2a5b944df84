// Per-class signal shaping table
//
// Every synthesized artifact derives its structure from this closed lookup:
// carrier mix and temporal modulation for the waveform, Gaussian peak set for
// the spectrum, energy band and modulation for the time-frequency grid. Only
// the random jitter added on top of these shapes varies between calls.
//
// Constants mirror the demo dataset's published signatures: mid-frequency
// bursting for circumferential cracks, diffuse broadband for gasket leaks,
// high-frequency pulsing for longitudinal cracks, near-steady high-frequency
// hiss for orifice leaks, and low smooth energy for no-leak flow.

use crate::catalog::LeakClass;

/// Temporal modulation applied to a class's energy band
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    /// No temporal structure
    None,
    /// Sinusoidal amplitude modulation: `1 + depth * sin(t * PI * rate)`
    Sine { rate: f32, depth: f32 },
    /// On/off gating: `high` while `sin(t * PI * rate) > threshold`, else `low`
    Pulse {
        rate: f32,
        threshold: f32,
        high: f32,
        low: f32,
    },
}

impl Modulation {
    /// Modulation factor at time `t` (seconds into the trace)
    pub fn value(&self, t: f32) -> f32 {
        match *self {
            Modulation::None => 1.0,
            Modulation::Sine { rate, depth } => {
                1.0 + depth * (t * std::f32::consts::PI * rate).sin()
            }
            Modulation::Pulse {
                rate,
                threshold,
                high,
                low,
            } => {
                if (t * std::f32::consts::PI * rate).sin() > threshold {
                    high
                } else {
                    low
                }
            }
        }
    }
}

/// One Gaussian peak of a class's frequency spectrum
#[derive(Debug, Clone, Copy)]
pub struct SpectralPeak {
    pub center_khz: f32,
    pub width_khz: f32,
    pub gain: f32,
}

/// Complete shaping parameters for one leak class
#[derive(Debug, Clone, Copy)]
pub struct ClassShape {
    // Waveform: sinusoid carriers as (frequency multiplier, amplitude) over
    // normalized time, a gain on the shared broadband base, and the temporal
    // modulation applied to the carrier mix
    pub carriers: &'static [(f32, f32)],
    pub waveform_base_gain: f32,
    pub waveform_modulation: Modulation,

    // Spectrum: gain on the shared broadband floor plus class peaks
    pub broadband_gain: f32,
    pub peaks: &'static [SpectralPeak],

    // Time-frequency grid: designated energy band, its gain, a gain on the
    // shared base energy, the grid noise amplitude, and the band's temporal
    // modulation
    pub band_center_khz: f32,
    pub band_width_khz: f32,
    pub band_gain: f32,
    pub grid_base_gain: f32,
    pub grid_noise: f32,
    pub grid_modulation: Modulation,
}

const CIRCUMFERENTIAL: ClassShape = ClassShape {
    carriers: &[(50.0, 0.25)],
    waveform_base_gain: 1.0,
    waveform_modulation: Modulation::Sine {
        rate: 4.0,
        depth: 0.4,
    },
    broadband_gain: 1.0,
    peaks: &[
        SpectralPeak {
            center_khz: 3.2,
            width_khz: 1.5,
            gain: 0.50,
        },
        SpectralPeak {
            center_khz: 2.0,
            width_khz: 0.8,
            gain: 0.25,
        },
    ],
    band_center_khz: 3.5,
    band_width_khz: 1.2,
    band_gain: 45.0,
    grid_base_gain: 1.0,
    grid_noise: 10.0,
    grid_modulation: Modulation::Sine {
        rate: 4.0,
        depth: 0.6,
    },
};

const GASKET: ClassShape = ClassShape {
    carriers: &[(35.0, 0.22), (65.0, 0.18)],
    waveform_base_gain: 1.3,
    waveform_modulation: Modulation::None,
    broadband_gain: 1.2,
    peaks: &[
        SpectralPeak {
            center_khz: 1.8,
            width_khz: 1.8,
            gain: 0.42,
        },
        SpectralPeak {
            center_khz: 3.5,
            width_khz: 1.2,
            gain: 0.38,
        },
    ],
    band_center_khz: 2.5,
    band_width_khz: 2.5,
    band_gain: 35.0,
    grid_base_gain: 1.0,
    grid_noise: 25.0,
    grid_modulation: Modulation::Sine {
        rate: 1.5,
        depth: 0.3,
    },
};

const LONGITUDINAL: ClassShape = ClassShape {
    carriers: &[(70.0, 0.28)],
    waveform_base_gain: 0.9,
    waveform_modulation: Modulation::Pulse {
        rate: 3.0,
        threshold: 0.3,
        high: 1.4,
        low: 0.6,
    },
    broadband_gain: 1.0,
    peaks: &[
        SpectralPeak {
            center_khz: 4.2,
            width_khz: 1.3,
            gain: 0.48,
        },
        SpectralPeak {
            center_khz: 2.8,
            width_khz: 0.9,
            gain: 0.28,
        },
    ],
    band_center_khz: 4.5,
    band_width_khz: 1.5,
    band_gain: 40.0,
    grid_base_gain: 0.8,
    grid_noise: 8.0,
    grid_modulation: Modulation::Pulse {
        rate: 3.0,
        threshold: 0.3,
        high: 1.5,
        low: 0.6,
    },
};

const NO_LEAK: ClassShape = ClassShape {
    carriers: &[(8.0, 0.20)],
    waveform_base_gain: 0.5,
    waveform_modulation: Modulation::None,
    broadband_gain: 0.6,
    peaks: &[SpectralPeak {
        center_khz: 0.8,
        width_khz: 1.2,
        gain: 0.35,
    }],
    band_center_khz: 1.0,
    band_width_khz: 1.5,
    band_gain: 25.0,
    grid_base_gain: 0.5,
    grid_noise: 10.0,
    grid_modulation: Modulation::None,
};

const ORIFICE: ClassShape = ClassShape {
    carriers: &[(95.0, 0.30), (55.0, 0.20)],
    waveform_base_gain: 1.0,
    waveform_modulation: Modulation::None,
    broadband_gain: 1.0,
    peaks: &[
        SpectralPeak {
            center_khz: 5.8,
            width_khz: 1.4,
            gain: 0.52,
        },
        SpectralPeak {
            center_khz: 3.5,
            width_khz: 1.0,
            gain: 0.30,
        },
    ],
    band_center_khz: 5.5,
    band_width_khz: 1.3,
    band_gain: 50.0,
    grid_base_gain: 1.0,
    grid_noise: 10.0,
    grid_modulation: Modulation::Sine {
        rate: 0.8,
        depth: 0.15,
    },
};

/// Shape lookup for a leak class
///
/// Total over the closed enum; there is no fallback branch.
pub fn shape_for(class: LeakClass) -> &'static ClassShape {
    match class {
        LeakClass::CircumferentialCrack => &CIRCUMFERENTIAL,
        LeakClass::GasketLeak => &GASKET,
        LeakClass::LongitudinalCrack => &LONGITUDINAL,
        LeakClass::NoLeak => &NO_LEAK,
        LeakClass::OrificeLeak => &ORIFICE,
    }
}

/// Gaussian bump: `exp(-((x - center) / width)^2)`
#[inline]
pub fn gaussian(x: f32, center: f32, width: f32) -> f32 {
    let d = (x - center) / width;
    (-d * d).exp()
}
