//! Retrieval of posted proofs from the DA layer.

use crate::PosterError;

use alloy_primitives::Bytes;
use proof_da_primitives::DaPayload;
use proof_da_providers::DaBackend;

/// Fetches every chunk of the payload from the backend, in order, and returns the reassembled
/// proof.
pub async fn retrieve_proof<B: DaBackend + ?Sized>(
    backend: &B,
    payload: &DaPayload,
) -> Result<Bytes, PosterError> {
    if payload.solution() != backend.solution() {
        return Err(PosterError::SolutionMismatch {
            payload: payload.solution(),
            backend: backend.solution(),
        })
    }

    let mut proof = Vec::new();
    for (index, chunk) in payload.chunks().iter().enumerate() {
        let data = backend
            .blob(chunk.index, chunk.proof_associated_data)
            .await
            .map_err(PosterError::BackendUnavailable)?
            .ok_or(PosterError::ChunkNotFound { index, position: chunk.index })?;
        proof.extend_from_slice(&data);
    }

    Ok(proof.into())
}
