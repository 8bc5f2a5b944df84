// LeakScope Core - Hydrophone Leak Detection Demo Engine
// Staged synthetic-signal pipeline with canned classification results

// Module declarations
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod synth;

// Re-exports for convenience
pub use catalog::{ClassProbability, ClassificationResult, LeakClass, Sample, SampleCatalog};
pub use config::{DemoConfig, PipelineConfig, SynthesisConfig};
pub use engine::DemoEngine;
pub use error::{ErrorCode, PipelineError, SynthesisError};
pub use pipeline::{PipelineEvent, PipelineSequencer, StageId, StagePayload, StagePlan};
pub use synth::{DifferenceGrid, ResolutionProfile, TimeFrequencyGrid};
