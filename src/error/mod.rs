// Error types for the leakscope demo engine
//
// This module defines custom error types for signal synthesis and pipeline
// operations, providing structured error handling with stable numeric codes.
//
// All errors here are local-contract violations (caller bugs), not runtime
// conditions: the engine has no I/O and no external dependency, so there is
// no recoverable error class.

mod pipeline;
mod synthesis;

pub use pipeline::{log_pipeline_error, PipelineError, PipelineErrorCodes};
pub use synthesis::{log_synthesis_error, SynthesisError, SynthesisErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the crate and its consumers.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
