// PipelineSequencer - timer-driven stage machine
//
// One driver task per run sleeps to each stage offset, synthesizes that
// stage's artifact, and publishes it. A generation counter guarded by the
// same mutex every publish takes makes cancellation atomic: `start` bumps
// the generation before aborting the previous task, so a cancelled run can
// never publish after the cancellation, even if its driver is mid-stage.
//
// The sequencer holds no global state; independent instances are fully
// isolated.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};

use crate::catalog::Sample;
use crate::config::SynthesisConfig;
use crate::error::{log_pipeline_error, log_synthesis_error};
use crate::pipeline::plan::StagePlan;
use crate::pipeline::{PipelineEvent, PipelineRun, StageId, StagePayload};
use crate::resolver;
use crate::synth::{
    compute_difference, synthesize_spectrum, synthesize_time_frequency, synthesize_waveform,
    ResolutionProfile,
};

/// Broadcast buffer: a full seven-stage run emits 46 events
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Timer-driven pipeline state machine
///
/// `start` cancels any in-flight run and begins a new one; `stop` returns to
/// Idle. Both are idempotent and never panic when no run is active. Stage
/// events are published to every subscriber in emission order.
pub struct PipelineSequencer {
    shared: Arc<Shared>,
    current_task: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    synthesis: SynthesisConfig,
    plan: StagePlan,
    events_tx: broadcast::Sender<PipelineEvent>,
    state: Mutex<SharedState>,
}

/// Observable sequencer state, updated under the publish lock
struct SharedState {
    generation: u64,
    stage: StageId,
    window_position: usize,
}

impl PipelineSequencer {
    pub fn new(synthesis: SynthesisConfig, plan: StagePlan) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                synthesis,
                plan,
                events_tx,
                state: Mutex::new(SharedState {
                    generation: 0,
                    stage: StageId::Idle,
                    window_position: 0,
                }),
            }),
            current_task: Mutex::new(None),
        }
    }

    /// Subscribe to pipeline events
    ///
    /// Each subscriber receives an independent copy of every event published
    /// after subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.shared.events_tx.subscribe()
    }

    /// Start a run for a sample, cancelling any run in flight
    ///
    /// Must be called from within a tokio runtime. Returns the new run id.
    pub fn start(&self, sample: Sample) -> u64 {
        // Bump the generation first: from this point the previous run cannot
        // publish, whether or not its task has observed the abort yet
        let generation = {
            let mut state = self.shared.state.lock().unwrap();
            state.generation += 1;
            state.stage = StageId::Idle;
            state.window_position = 0;
            state.generation
        };

        let mut slot = self.current_task.lock().unwrap();
        if let Some(task) = slot.take() {
            task.abort();
        }

        log::info!(
            "[Sequencer] run {} started: sample {} ({})",
            generation,
            sample.id,
            sample.class
        );

        let shared = Arc::clone(&self.shared);
        let run = PipelineRun::new(sample);
        *slot = Some(tokio::spawn(async move {
            shared.drive(generation, run).await;
        }));

        generation
    }

    /// Cancel any run in flight and return to Idle
    ///
    /// Idempotent; never panics when no run is active.
    pub fn stop(&self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.generation += 1;
            state.stage = StageId::Idle;
            state.window_position = 0;
        }
        if let Some(task) = self.current_task.lock().unwrap().take() {
            task.abort();
        }
        log::info!("[Sequencer] stopped");
    }

    /// Stage the sequencer is currently in (`Idle` between runs)
    pub fn current_stage(&self) -> StageId {
        self.shared.state.lock().unwrap().stage
    }

    /// Last published sliding-window position of the current run
    pub fn window_position(&self) -> usize {
        self.shared.state.lock().unwrap().window_position
    }
}

impl Shared {
    /// Publish an event if `generation` is still the live run
    ///
    /// Returns false when the run has been cancelled; the driver exits on
    /// that signal. Send errors only mean nobody is subscribed.
    fn publish(
        &self,
        generation: u64,
        stage: StageId,
        window_position: usize,
        payload: StagePayload,
    ) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            return false;
        }
        state.stage = stage;
        state.window_position = window_position;
        let _ = self.events_tx.send(PipelineEvent {
            run_id: generation,
            stage,
            payload,
        });
        true
    }

    /// Synthesize the artifact for an entered stage
    ///
    /// Grid profiles are cached on the run: the sharp grid is swept later by
    /// the sliding window, and the difference stage consumes both profiles.
    fn payload_for(&self, stage: StageId, run: &mut PipelineRun) -> Option<StagePayload> {
        let class = run.sample.class;
        match stage {
            StageId::RawWaveform => Some(StagePayload::Waveform(synthesize_waveform(
                class,
                &self.synthesis,
            ))),
            StageId::FrequencySpectrum => Some(StagePayload::Spectrum(synthesize_spectrum(
                class,
                &self.synthesis,
            ))),
            StageId::BaselineGrid => {
                let grid =
                    synthesize_time_frequency(class, ResolutionProfile::Baseline, &self.synthesis);
                run.baseline_grid = Some(grid.clone());
                Some(StagePayload::Grid(grid))
            }
            StageId::SharpGrid | StageId::Spectrogram => {
                let grid =
                    synthesize_time_frequency(class, ResolutionProfile::Sharp, &self.synthesis);
                run.sharp_grid = Some(grid.clone());
                Some(StagePayload::Grid(grid))
            }
            StageId::DifferenceGrid => {
                let synthesis = &self.synthesis;
                let baseline = run.baseline_grid.get_or_insert_with(|| {
                    synthesize_time_frequency(class, ResolutionProfile::Baseline, synthesis)
                });
                let sharp = run.sharp_grid.get_or_insert_with(|| {
                    synthesize_time_frequency(class, ResolutionProfile::Sharp, synthesis)
                });
                match compute_difference(sharp, baseline) {
                    Ok(difference) => Some(StagePayload::Difference(difference)),
                    Err(err) => {
                        // Both grids come from one configuration; a mismatch
                        // is a plan/configuration defect
                        log_synthesis_error(&err, "difference stage");
                        debug_assert!(false, "difference stage mismatch: {}", err);
                        None
                    }
                }
            }
            StageId::Idle | StageId::SlidingWindow | StageId::Complete => {
                log::error!(
                    "[Sequencer] stage {:?} cannot appear in an artifact plan",
                    stage
                );
                debug_assert!(false, "invalid artifact stage {:?}", stage);
                None
            }
        }
    }

    /// Drive one run through its plan
    async fn drive(self: Arc<Self>, generation: u64, mut run: PipelineRun) {
        let started = Instant::now();

        for spec in self.plan.artifact_stages.clone() {
            sleep_until(started + spec.offset).await;
            let Some(payload) = self.payload_for(spec.stage, &mut run) else {
                return;
            };
            run.current_stage = spec.stage;
            if !self.publish(generation, spec.stage, run.window_position, payload) {
                return;
            }
        }

        // Sliding-window sweep: one position per tick, monotonically
        // increasing to the last time bin
        sleep_until(started + self.plan.sliding_start).await;
        run.current_stage = StageId::SlidingWindow;
        let width = self.synthesis.window_width;
        for position in 0..self.synthesis.time_bins {
            if position > 0 {
                sleep(self.plan.tick).await;
            }
            run.window_position = position;
            let payload = StagePayload::WindowPosition { position, width };
            if !self.publish(generation, StageId::SlidingWindow, position, payload) {
                return;
            }
        }

        sleep(self.plan.settle).await;
        match resolver::resolve(Some(&run.sample)) {
            Ok(result) => {
                run.current_stage = StageId::Complete;
                self.publish(
                    generation,
                    StageId::Complete,
                    run.window_position,
                    StagePayload::Result(result),
                );
                log::info!("[Sequencer] run {} complete", generation);
            }
            Err(err) => log_pipeline_error(&err, "complete stage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LeakClass, SampleCatalog};
    use crate::config::PipelineConfig;
    use std::time::Duration;
    use tokio::time::timeout;

    fn seven_stage_sequencer() -> PipelineSequencer {
        PipelineSequencer::new(
            SynthesisConfig::default(),
            StagePlan::seven_stage(&PipelineConfig::default()),
        )
    }

    fn sample(class: LeakClass) -> Sample {
        SampleCatalog::new().first_of_class(class).unwrap().clone()
    }

    /// Receive events until Complete; paused time auto-advances the timers
    async fn collect_run(rx: &mut broadcast::Receiver<PipelineEvent>) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        loop {
            let event = timeout(Duration::from_secs(600), rx.recv())
                .await
                .expect("run did not complete")
                .expect("event channel closed");
            let done = event.stage == StageId::Complete;
            events.push(event);
            if done {
                return events;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_emits_exact_stage_order() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::NoLeak));

        let events = collect_run(&mut rx).await;
        let mut expected = vec![
            StageId::RawWaveform,
            StageId::FrequencySpectrum,
            StageId::BaselineGrid,
            StageId::SharpGrid,
            StageId::DifferenceGrid,
        ];
        expected.extend(std::iter::repeat(StageId::SlidingWindow).take(40));
        expected.push(StageId::Complete);

        let stages: Vec<StageId> = events.iter().map(|e| e.stage).collect();
        assert_eq!(stages, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sliding_positions_are_gapless() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::GasketLeak));

        let events = collect_run(&mut rx).await;
        let positions: Vec<usize> = events
            .iter()
            .filter_map(|e| match e.payload {
                StagePayload::WindowPosition { position, .. } => Some(position),
                _ => None,
            })
            .collect();
        assert_eq!(positions, (0..40).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_payload_carries_configured_width() {
        let synthesis = SynthesisConfig {
            window_width: 6,
            ..SynthesisConfig::default()
        };
        let sequencer = PipelineSequencer::new(
            synthesis,
            StagePlan::seven_stage(&PipelineConfig::default()),
        );
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::NoLeak));

        let events = collect_run(&mut rx).await;
        let widths: Vec<usize> = events
            .iter()
            .filter_map(|e| match e.payload {
                StagePayload::WindowPosition { width, .. } => Some(width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 40);
        assert!(widths.iter().all(|&w| w == 6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_payload_is_canned_result() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();
        let selected = sample(LeakClass::NoLeak);
        sequencer.start(selected.clone());

        let events = collect_run(&mut rx).await;
        match &events.last().unwrap().payload {
            StagePayload::Result(result) => {
                assert_eq!(*result, selected.canned_result);
                assert_eq!(result.confidence_percent, 98.9);
            }
            other => panic!("expected Result payload, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_before_first_stage_publishes_once() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();

        let first = sequencer.start(sample(LeakClass::OrificeLeak));
        let second = sequencer.start(sample(LeakClass::NoLeak));
        assert_ne!(first, second);

        let events = collect_run(&mut rx).await;
        let raw_count = events
            .iter()
            .filter(|e| e.stage == StageId::RawWaveform)
            .count();
        assert_eq!(raw_count, 1, "stale run must not publish");
        assert!(events.iter().all(|e| e.run_id == second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_stages() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::LongitudinalCrack));

        // Consume the first stage, then cancel
        let first = timeout(Duration::from_secs(600), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.stage, StageId::RawWaveform);
        sequencer.stop();
        assert_eq!(sequencer.current_stage(), StageId::Idle);

        // Nothing further may arrive, no matter how far time advances
        let silence = timeout(Duration::from_secs(600), rx.recv()).await;
        assert!(silence.is_err(), "cancelled run published {:?}", silence);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let sequencer = seven_stage_sequencer();
        sequencer.stop();
        sequencer.stop();
        assert_eq!(sequencer.current_stage(), StageId::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_stage_plan_collapses_grid_stages() {
        let sequencer = PipelineSequencer::new(
            SynthesisConfig::default(),
            StagePlan::five_stage(&PipelineConfig::default()),
        );
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::CircumferentialCrack));

        let events = collect_run(&mut rx).await;
        let mut expected = vec![
            StageId::RawWaveform,
            StageId::FrequencySpectrum,
            StageId::Spectrogram,
        ];
        expected.extend(std::iter::repeat(StageId::SlidingWindow).take(40));
        expected.push(StageId::Complete);

        let stages: Vec<StageId> = events.iter().map(|e| e.stage).collect();
        assert_eq!(stages, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_has_no_automatic_exit() {
        let sequencer = seven_stage_sequencer();
        let mut rx = sequencer.subscribe();
        sequencer.start(sample(LeakClass::NoLeak));
        collect_run(&mut rx).await;

        assert_eq!(sequencer.current_stage(), StageId::Complete);

        // Only a new start leaves Complete
        let silence = timeout(Duration::from_secs(600), rx.recv()).await;
        assert!(silence.is_err());
        sequencer.start(sample(LeakClass::GasketLeak));
        let events = collect_run(&mut rx).await;
        assert_eq!(events.first().unwrap().stage, StageId::RawWaveform);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_sequencers_do_not_interfere() {
        let a = seven_stage_sequencer();
        let b = seven_stage_sequencer();
        let mut rx_a = a.subscribe();
        let mut rx_b = b.subscribe();

        a.start(sample(LeakClass::NoLeak));
        b.start(sample(LeakClass::OrificeLeak));

        let events_a = collect_run(&mut rx_a).await;
        let events_b = collect_run(&mut rx_b).await;

        match (&events_a.last().unwrap().payload, &events_b.last().unwrap().payload) {
            (StagePayload::Result(ra), StagePayload::Result(rb)) => {
                assert_eq!(ra.predicted, LeakClass::NoLeak);
                assert_eq!(rb.predicted, LeakClass::OrificeLeak);
            }
            other => panic!("expected Result payloads, got {:?}", other),
        }
    }
}
