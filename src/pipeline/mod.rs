// Pipeline - staged analysis animation state machine
//
// The sequencer drives timed transitions through an ordered list of stages,
// synthesizing each stage's artifact on entry and publishing (stage, payload)
// events to subscribers over a tokio broadcast channel. One sub-animation
// (the sliding classifier window) runs tick-by-tick inside a single stage.
//
// All run state lives in one PipelineRun value owned by the driver task of
// that run; sequencer instances share nothing, so tests can run several in
// isolation.

pub mod plan;
pub mod sequencer;

pub use plan::{StagePlan, StageSpec};
pub use sequencer::PipelineSequencer;

use crate::catalog::{ClassificationResult, Sample};
use crate::synth::{DifferenceGrid, SpectrumPoint, TimeFrequencyGrid, WaveformPoint};

/// One named phase of the simulated pipeline
///
/// The canonical plan runs the seven analysis stages in declaration order;
/// the collapsed plan replaces the three grid stages with `Spectrogram`.
/// `Idle` is the rest state between runs and never appears in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StageId {
    Idle,
    RawWaveform,
    FrequencySpectrum,
    BaselineGrid,
    SharpGrid,
    DifferenceGrid,
    /// Collapsed single-grid stage of the five-stage plan
    Spectrogram,
    SlidingWindow,
    Complete,
}

/// Payload published with a stage transition
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum StagePayload {
    Waveform(Vec<WaveformPoint>),
    Spectrum(Vec<SpectrumPoint>),
    Grid(TimeFrequencyGrid),
    Difference(DifferenceGrid),
    /// Leading edge and width of the sliding classifier window, in time bins
    WindowPosition { position: usize, width: usize },
    Result(ClassificationResult),
}

/// One event of the publish contract
///
/// `run_id` identifies the run that produced the event; a new `start` call
/// begins a new run id, and events from a cancelled run never appear after
/// the cancellation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineEvent {
    pub run_id: u64,
    pub stage: StageId,
    pub payload: StagePayload,
}

/// Ephemeral state of one pipeline run
///
/// Created on `start`, owned by that run's driver task, and dropped when the
/// run completes or is cancelled. Never persisted.
#[derive(Debug)]
pub struct PipelineRun {
    pub sample: Sample,
    pub current_stage: StageId,
    pub window_position: usize,
    /// Grids cached across stages: the sharp grid is swept by the sliding
    /// window, and the difference stage consumes both profiles
    pub(crate) baseline_grid: Option<TimeFrequencyGrid>,
    pub(crate) sharp_grid: Option<TimeFrequencyGrid>,
}

impl PipelineRun {
    pub fn new(sample: Sample) -> Self {
        Self {
            sample,
            current_stage: StageId::Idle,
            window_position: 0,
            baseline_grid: None,
            sharp_grid: None,
        }
    }
}
