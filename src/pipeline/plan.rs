// Stage plans - the stage list as data
//
// A plan is an ordered list of artifact stages with absolute offsets from run
// start, plus the sliding-window timing. Keeping the list as data lets the
// seven-stage and five-stage demo variants share one sequencer.

use std::time::Duration;

use crate::config::PipelineConfig;
use crate::pipeline::StageId;

/// One scheduled artifact stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSpec {
    pub stage: StageId,
    /// Offset from run start at which the stage fires
    pub offset: Duration,
}

/// Ordered schedule of one pipeline variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    /// Artifact stages in firing order, offsets strictly increasing
    pub artifact_stages: Vec<StageSpec>,
    /// Offset of the first sliding-window position
    pub sliding_start: Duration,
    /// Interval between window positions
    pub tick: Duration,
    /// Delay between the last window position and Complete
    pub settle: Duration,
}

impl StagePlan {
    /// Canonical seven-stage plan
    ///
    /// RawWaveform, FrequencySpectrum, then the Baseline/Sharp/Difference
    /// grid triple, then the sliding window and Complete.
    pub fn seven_stage(config: &PipelineConfig) -> Self {
        let plan = Self {
            artifact_stages: vec![
                StageSpec {
                    stage: StageId::RawWaveform,
                    offset: config.stage_delay_raw(),
                },
                StageSpec {
                    stage: StageId::FrequencySpectrum,
                    offset: config.stage_delay_spectrum(),
                },
                StageSpec {
                    stage: StageId::BaselineGrid,
                    offset: config.stage_delay_baseline(),
                },
                StageSpec {
                    stage: StageId::SharpGrid,
                    offset: config.stage_delay_sharp(),
                },
                StageSpec {
                    stage: StageId::DifferenceGrid,
                    offset: config.stage_delay_difference(),
                },
            ],
            sliding_start: config.stage_delay_sliding_start(),
            tick: config.sliding_tick(),
            settle: config.final_settle(),
        };
        debug_assert!(plan.offsets_are_ordered());
        plan
    }

    /// Collapsed five-stage plan
    ///
    /// One Spectrogram stage replaces the grid triple; the spectrogram fires
    /// at the baseline offset and the sweep at the sharp offset, which with
    /// default configuration reproduces the original five-step demo's
    /// 500/2000/3500/5000 ms schedule.
    pub fn five_stage(config: &PipelineConfig) -> Self {
        let plan = Self {
            artifact_stages: vec![
                StageSpec {
                    stage: StageId::RawWaveform,
                    offset: config.stage_delay_raw(),
                },
                StageSpec {
                    stage: StageId::FrequencySpectrum,
                    offset: config.stage_delay_spectrum(),
                },
                StageSpec {
                    stage: StageId::Spectrogram,
                    offset: config.stage_delay_baseline(),
                },
            ],
            sliding_start: config.stage_delay_sharp(),
            tick: config.sliding_tick(),
            settle: config.final_settle(),
        };
        debug_assert!(plan.offsets_are_ordered());
        plan
    }

    /// Whether artifact offsets strictly increase and the sweep starts after
    /// the last artifact stage
    pub fn offsets_are_ordered(&self) -> bool {
        let increasing = self
            .artifact_stages
            .windows(2)
            .all(|pair| pair[0].offset < pair[1].offset);
        let sweep_last = self
            .artifact_stages
            .last()
            .map(|spec| spec.offset < self.sliding_start)
            .unwrap_or(true);
        increasing && sweep_last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_stage_order_and_defaults() {
        let plan = StagePlan::seven_stage(&PipelineConfig::default());
        let stages: Vec<StageId> = plan.artifact_stages.iter().map(|s| s.stage).collect();
        assert_eq!(
            stages,
            vec![
                StageId::RawWaveform,
                StageId::FrequencySpectrum,
                StageId::BaselineGrid,
                StageId::SharpGrid,
                StageId::DifferenceGrid,
            ]
        );
        assert!(plan.offsets_are_ordered());
        assert_eq!(plan.artifact_stages[0].offset, Duration::from_millis(500));
        assert_eq!(plan.sliding_start, Duration::from_millis(8000));
        assert_eq!(plan.tick, Duration::from_millis(150));
    }

    #[test]
    fn test_five_stage_matches_original_schedule() {
        let plan = StagePlan::five_stage(&PipelineConfig::default());
        let stages: Vec<StageId> = plan.artifact_stages.iter().map(|s| s.stage).collect();
        assert_eq!(
            stages,
            vec![
                StageId::RawWaveform,
                StageId::FrequencySpectrum,
                StageId::Spectrogram,
            ]
        );
        let offsets: Vec<u64> = plan
            .artifact_stages
            .iter()
            .map(|s| s.offset.as_millis() as u64)
            .collect();
        assert_eq!(offsets, vec![500, 2000, 3500]);
        assert_eq!(plan.sliding_start, Duration::from_millis(5000));
    }

    #[test]
    fn test_offsets_ordering_detects_violations() {
        let mut plan = StagePlan::seven_stage(&PipelineConfig::default());
        plan.artifact_stages[1].offset = Duration::from_millis(100);
        assert!(!plan.offsets_are_ordered());
    }
}
