//! Intake gate: the multiplicity check applied before any transfer.

use intake_core::{OrchestrationPolicy, UploadBatch, UploadError, UploadResult};

/// Accept or reject a batch under `policy`.
///
/// A single-file policy rejects any batch with more than one file. Accepted
/// batches are returned unchanged.
pub fn accept(batch: UploadBatch, policy: &OrchestrationPolicy) -> UploadResult<UploadBatch> {
    if !policy.allow_multiple && batch.len() > 1 {
        tracing::debug!(
            file_count = batch.len(),
            "Batch rejected by single-file policy"
        );
        return Err(UploadError::TooManyFiles { count: batch.len() });
    }
    Ok(batch)
}
