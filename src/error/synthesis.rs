// Synthesis error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Synthesis error code constants
///
/// These constants provide a single source of truth for error codes
/// shared between the engine and its consumers.
///
/// Error code range: 1001-1002
pub struct SynthesisErrorCodes {}

impl SynthesisErrorCodes {
    /// Synthesis requested for an unrecognized leak class label
    pub const INVALID_LEAK_CLASS: i32 = 1001;

    /// Difference computed over grids of unequal dimensions
    pub const DIMENSION_MISMATCH: i32 = 1002;
}

/// Log a synthesis error with structured context
///
/// Logs synthesis errors with the numeric error code, the component, and a
/// human-readable message. These errors indicate a defect in the caller, so
/// they are logged at error level rather than surfaced to an end user.
pub fn log_synthesis_error(err: &SynthesisError, context: &str) {
    error!(
        "Synthesis error in {}: code={}, component=SignalSynthesizer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Signal-synthesis-related errors
///
/// These cover the SignalSynthesizer and DifferenceComputer contracts. Both
/// variants are programming errors: the closed `LeakClass` enum makes every
/// internal synthesis branch total, so an invalid class can only arise when
/// parsing a label string, and a dimension mismatch only when a caller pairs
/// grids from different configurations.
///
/// Error code range: 1001-1002
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// Synthesis requested for an unrecognized leak class label
    InvalidLeakClass { label: String },

    /// Difference computed over grids of unequal dimensions
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl ErrorCode for SynthesisError {
    fn code(&self) -> i32 {
        match self {
            SynthesisError::InvalidLeakClass { .. } => SynthesisErrorCodes::INVALID_LEAK_CLASS,
            SynthesisError::DimensionMismatch { .. } => SynthesisErrorCodes::DIMENSION_MISMATCH,
        }
    }

    fn message(&self) -> String {
        match self {
            SynthesisError::InvalidLeakClass { label } => {
                format!("Unrecognized leak class label: {:?}", label)
            }
            SynthesisError::DimensionMismatch { left, right } => {
                format!(
                    "Grid dimensions differ: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                )
            }
        }
    }
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SynthesisError (code {}): {}",
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SynthesisError {}
