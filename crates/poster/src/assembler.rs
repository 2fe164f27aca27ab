//! Submission of chunks and assembly of the [`DaPayload`].

use crate::PosterError;

use proof_da_primitives::{DaPayload, DaPayloadChunk, DaSolution, SubmissionResult};
use proof_da_providers::DaBackend;

/// Submits the chunks to the backend as a single batch and returns the resulting [`DaPayload`].
///
/// The backend is called exactly once. Nothing is returned unless the submission succeeded and
/// yielded one commitment per chunk.
pub async fn assemble<B: DaBackend + ?Sized>(
    backend: &B,
    chunks: &[&[u8]],
) -> Result<DaPayload, PosterError> {
    let result = backend.submit(chunks).await.map_err(PosterError::DaSubmissionFailed)?;
    build_payload(backend.solution(), chunks.len(), result)
}

/// Builds the [`DaPayload`] for `chunk_count` chunks from the result of their submission.
pub fn build_payload(
    solution: DaSolution,
    chunk_count: usize,
    result: SubmissionResult,
) -> Result<DaPayload, PosterError> {
    if result.commitments.len() != chunk_count {
        return Err(PosterError::MalformedSubmissionResult {
            expected: chunk_count,
            got: result.commitments.len(),
        })
    }

    let position = result.position;
    let chunks = result
        .commitments
        .into_iter()
        .map(|commitment| DaPayloadChunk::new(commitment, position))
        .collect();

    Ok(DaPayload::new(solution, chunks))
}
