// ResultResolver - canned classification lookup
//
// The terminal pipeline stage reports a precomputed result attached to the
// selected sample. No computation happens here; the resolver exists so the
// sequencer's Complete stage has a single, testable seam.

use crate::catalog::{ClassificationResult, Sample};
use crate::error::PipelineError;

/// Resolve the classification result for a sample
///
/// Returns the sample's canned result unchanged.
///
/// # Returns
/// * `Ok(ClassificationResult)` - the stored result, verbatim
/// * `Err(PipelineError::UnknownSample)` - no sample was supplied
pub fn resolve(sample: Option<&Sample>) -> Result<ClassificationResult, PipelineError> {
    match sample {
        Some(sample) => Ok(sample.canned_result.clone()),
        None => Err(PipelineError::UnknownSample {
            detail: "no sample selected".to_string(),
        }),
    }
}
