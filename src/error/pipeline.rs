// Pipeline error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Pipeline error code constants
///
/// Error code range: 2001
pub struct PipelineErrorCodes {}

impl PipelineErrorCodes {
    /// Result resolution or analysis requested with no sample
    pub const UNKNOWN_SAMPLE: i32 = 2001;
}

/// Log a pipeline error with structured context
pub fn log_pipeline_error(err: &PipelineError, context: &str) {
    error!(
        "Pipeline error in {}: code={}, component=PipelineSequencer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Pipeline-related errors
///
/// The sequencer itself has no external failure mode (all data is synthesized
/// locally); the only error is a caller asking for a sample the catalog does
/// not hold, or resolving a result with no sample at all.
///
/// Error code range: 2001
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Resolution or analysis requested with a missing or unknown sample
    UnknownSample { detail: String },
}

impl ErrorCode for PipelineError {
    fn code(&self) -> i32 {
        match self {
            PipelineError::UnknownSample { .. } => PipelineErrorCodes::UNKNOWN_SAMPLE,
        }
    }

    fn message(&self) -> String {
        match self {
            PipelineError::UnknownSample { detail } => {
                format!("Unknown sample: {}", detail)
            }
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PipelineError (code {}): {}",
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PipelineError {}
