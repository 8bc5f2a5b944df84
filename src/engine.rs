// DemoEngine - top-level handle over catalog, config, and sequencer
//
// Owns one PipelineSequencer and the sample catalog. Callers select a sample
// (by id or by class), subscribe to the event stream, and render whatever
// arrives. Engines are independent; creating two gives two isolated demos.

use tokio_stream::wrappers::BroadcastStream;

use crate::catalog::{LeakClass, Sample, SampleCatalog};
use crate::config::DemoConfig;
use crate::error::{log_pipeline_error, PipelineError};
use crate::pipeline::{PipelineEvent, PipelineSequencer, StageId, StagePlan};

pub struct DemoEngine {
    config: DemoConfig,
    catalog: SampleCatalog,
    sequencer: PipelineSequencer,
}

impl DemoEngine {
    /// Engine with default configuration and the canonical seven-stage plan
    pub fn new() -> Self {
        Self::with_config(DemoConfig::default())
    }

    pub fn with_config(config: DemoConfig) -> Self {
        let plan = StagePlan::seven_stage(&config.pipeline);
        Self::with_plan(config, plan)
    }

    /// Engine with an explicit stage plan (e.g. `StagePlan::five_stage`)
    pub fn with_plan(config: DemoConfig, plan: StagePlan) -> Self {
        let sequencer = PipelineSequencer::new(config.synthesis.clone(), plan);
        Self {
            config,
            catalog: SampleCatalog::new(),
            sequencer,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SampleCatalog {
        &self.catalog
    }

    /// Subscribe to pipeline events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PipelineEvent> {
        self.sequencer.subscribe()
    }

    /// Pipeline events as a `Stream`, for `StreamExt` consumers
    pub fn events_stream(&self) -> BroadcastStream<PipelineEvent> {
        BroadcastStream::new(self.sequencer.subscribe())
    }

    /// Start a run for a catalog sample id, cancelling any run in flight
    ///
    /// Returns the run id on success.
    ///
    /// # Errors
    ///
    /// `PipelineError::UnknownSample` when the id is not in the catalog.
    pub fn analyze(&self, sample_id: u32) -> Result<u64, PipelineError> {
        let sample = self.catalog.by_id(sample_id).ok_or_else(|| {
            let err = PipelineError::UnknownSample {
                detail: format!("sample id {} is not in the catalog", sample_id),
            };
            log_pipeline_error(&err, "analyze");
            err
        })?;
        Ok(self.sequencer.start(sample.clone()))
    }

    /// Start a run for the first catalog variant of a class
    pub fn analyze_class(&self, class: LeakClass) -> Result<u64, PipelineError> {
        let sample = self.catalog.first_of_class(class).ok_or_else(|| {
            let err = PipelineError::UnknownSample {
                detail: format!("class {} has no catalog samples", class),
            };
            log_pipeline_error(&err, "analyze_class");
            err
        })?;
        Ok(self.sequencer.start(sample.clone()))
    }

    /// Start a run for an already-selected sample
    pub fn analyze_sample(&self, sample: Sample) -> u64 {
        self.sequencer.start(sample)
    }

    /// Cancel any run in flight and return to Idle
    pub fn stop(&self) {
        self.sequencer.stop();
    }

    pub fn current_stage(&self) -> StageId {
        self.sequencer.current_stage()
    }

    pub fn window_position(&self) -> usize {
        self.sequencer.window_position()
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}
