//! Integration tests for the demo pipeline
//!
//! These tests validate the complete analysis workflow across the engine layer:
//! - Sample selection and run startup
//! - Full stage progression and event ordering
//! - Restart and stop cancellation semantics
//! - Canned-result delivery at completion
//!
//! All tests run under paused tokio time, so the multi-second demo schedule
//! executes instantly with the real stage offsets still in effect.

use std::time::Duration;

use tokio::time::timeout;

use leakscope::{
    ClassificationResult, DemoConfig, DemoEngine, LeakClass, PipelineEvent, StageId, StagePayload,
    StagePlan,
};

/// Receive events for one run until Complete
async fn collect_run(
    rx: &mut tokio::sync::broadcast::Receiver<PipelineEvent>,
) -> Vec<PipelineEvent> {
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

fn final_result(events: &[PipelineEvent]) -> &ClassificationResult {
    match &events.last().expect("no events").payload {
        StagePayload::Result(result) => result,
        other => panic!("expected Result payload, got {:?}", other),
    }
}

/// Full seven-stage run for a no-leak sample
///
/// Verifies the canonical event sequence: five artifact stages in order, a
/// gapless 40-position sliding sweep, then Complete carrying the sample's
/// canned classification verbatim.
#[tokio::test(start_paused = true)]
async fn test_full_analysis_workflow() {
    let engine = DemoEngine::new();
    let mut rx = engine.subscribe();

    let run_id = engine.analyze(5).expect("sample 5 is in the catalog");
    let events = collect_run(&mut rx).await;

    // 5 artifacts + 40 window positions + Complete
    assert_eq!(events.len(), 46);
    assert!(events.iter().all(|e| e.run_id == run_id));

    let stages: Vec<StageId> = events.iter().map(|e| e.stage).collect();
    assert_eq!(
        &stages[..5],
        &[
            StageId::RawWaveform,
            StageId::FrequencySpectrum,
            StageId::BaselineGrid,
            StageId::SharpGrid,
            StageId::DifferenceGrid,
        ]
    );
    assert!(stages[5..45]
        .iter()
        .all(|stage| *stage == StageId::SlidingWindow));
    assert_eq!(stages[45], StageId::Complete);

    // Sliding positions are monotonic and gapless
    let positions: Vec<usize> = events
        .iter()
        .filter_map(|e| match e.payload {
            StagePayload::WindowPosition { position, .. } => Some(position),
            _ => None,
        })
        .collect();
    assert_eq!(positions, (0..40).collect::<Vec<_>>());

    // The result is the catalog's canned entry, reported verbatim
    let result = final_result(&events);
    assert_eq!(result.predicted, LeakClass::NoLeak);
    assert_eq!(result.confidence_percent, 98.9);
    assert_eq!(result.processing_time_label, "1.2s");
    assert_eq!(result.probabilities.len(), 5);

    assert_eq!(engine.current_stage(), StageId::Complete);
}

/// Stage payloads carry the synthesized artifacts with configured dimensions
#[tokio::test(start_paused = true)]
async fn test_stage_payloads_match_configuration() {
    let engine = DemoEngine::new();
    let config = engine.config().synthesis.clone();
    let mut rx = engine.subscribe();

    engine.analyze_class(LeakClass::OrificeLeak).unwrap();
    let events = collect_run(&mut rx).await;

    for event in &events {
        match (&event.stage, &event.payload) {
            (StageId::RawWaveform, StagePayload::Waveform(points)) => {
                assert_eq!(points.len(), config.waveform_len);
            }
            (StageId::FrequencySpectrum, StagePayload::Spectrum(points)) => {
                assert_eq!(points.len(), config.spectrum_len);
            }
            (StageId::BaselineGrid | StageId::SharpGrid, StagePayload::Grid(grid)) => {
                assert_eq!(grid.dimensions(), (config.time_bins, config.freq_bins));
            }
            (StageId::DifferenceGrid, StagePayload::Difference(diff)) => {
                assert_eq!(diff.dimensions(), (config.time_bins, config.freq_bins));
            }
            (StageId::SlidingWindow, StagePayload::WindowPosition { position, width }) => {
                assert!(*position < config.time_bins);
                assert_eq!(*width, config.window_width);
            }
            (StageId::Complete, StagePayload::Result(_)) => {}
            (stage, payload) => panic!("stage {:?} with payload {:?}", stage, payload),
        }
    }
}

/// Restarting before the first stage fires cancels the first run completely
///
/// Test steps:
/// 1. Start a run, then immediately start a second one
/// 2. Collect the second run to completion
/// 3. Verify exactly one RawWaveform event arrived and every event belongs
///    to the second run
#[tokio::test(start_paused = true)]
async fn test_restart_cancels_previous_run() {
    let engine = DemoEngine::new();
    let mut rx = engine.subscribe();

    let first = engine.analyze(1).unwrap();
    let second = engine.analyze(9).unwrap();
    assert_ne!(first, second);

    let events = collect_run(&mut rx).await;
    assert_eq!(
        events
            .iter()
            .filter(|e| e.stage == StageId::RawWaveform)
            .count(),
        1
    );
    assert!(events.iter().all(|e| e.run_id == second));
    assert_eq!(final_result(&events).predicted, LeakClass::OrificeLeak);
}

/// Stop mid-run silences the stream and returns the engine to Idle
#[tokio::test(start_paused = true)]
async fn test_stop_mid_run() {
    let engine = DemoEngine::new();
    let mut rx = engine.subscribe();
    engine.analyze(7).unwrap();

    let first = timeout(Duration::from_secs(600), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.stage, StageId::RawWaveform);

    engine.stop();
    assert_eq!(engine.current_stage(), StageId::Idle);
    assert_eq!(engine.window_position(), 0);

    let silence = timeout(Duration::from_secs(600), rx.recv()).await;
    assert!(silence.is_err(), "stopped run published {:?}", silence);
}

/// Collapsed five-stage schedule: one spectrogram stage replaces the grid trio
#[tokio::test(start_paused = true)]
async fn test_collapsed_schedule() {
    let config = DemoConfig::default();
    let plan = StagePlan::five_stage(&config.pipeline);
    let engine = DemoEngine::with_plan(config, plan);
    let mut rx = engine.subscribe();

    engine.analyze(3).unwrap();
    let events = collect_run(&mut rx).await;

    // 3 artifacts + 40 window positions + Complete
    assert_eq!(events.len(), 44);
    let stages: Vec<StageId> = events.iter().map(|e| e.stage).collect();
    assert_eq!(
        &stages[..3],
        &[
            StageId::RawWaveform,
            StageId::FrequencySpectrum,
            StageId::Spectrogram,
        ]
    );
    assert_eq!(final_result(&events).predicted, LeakClass::GasketLeak);
}

/// Late subscribers receive only events published after subscription
#[tokio::test(start_paused = true)]
async fn test_late_subscriber_sees_remaining_events() {
    let engine = DemoEngine::new();
    let mut early = engine.subscribe();
    engine.analyze(2).unwrap();

    // Consume the first stage on the early subscription, then join late
    let first = timeout(Duration::from_secs(600), early.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.stage, StageId::RawWaveform);

    let mut late = engine.subscribe();
    let events = collect_run(&mut late).await;
    assert!(events.iter().all(|e| e.stage != StageId::RawWaveform));
    assert_eq!(events.last().unwrap().stage, StageId::Complete);
}

/// Every catalog sample completes with its own canned result
#[tokio::test(start_paused = true)]
async fn test_every_sample_resolves_to_its_own_result() {
    let engine = DemoEngine::new();
    for sample in engine.catalog().samples() {
        let mut rx = engine.subscribe();
        engine.analyze(sample.id).unwrap();
        let events = collect_run(&mut rx).await;
        assert_eq!(final_result(&events), &sample.canned_result);
    }
}
