use proof_da_primitives::{BatchPosition, DaSolution};
use proof_da_providers::DaProviderError;

/// An error occurring while posting or retrieving a proof.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    /// The chunking configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The DA backend could not be reached.
    #[error("DA backend unavailable: {0}")]
    BackendUnavailable(#[source] DaProviderError),
    /// The DA backend failed to accept the batch.
    #[error("DA submission failed: {0}")]
    DaSubmissionFailed(#[source] DaProviderError),
    /// The DA backend returned a commitment count not matching the submitted chunks.
    #[error("malformed submission result: expected {expected} commitments, got {got}")]
    MalformedSubmissionResult {
        /// The number of submitted chunks.
        expected: usize,
        /// The number of returned commitments.
        got: usize,
    },
    /// The payload was posted to another DA solution than the backend's.
    #[error("payload posted to {payload}, backend serves {backend}")]
    SolutionMismatch {
        /// The solution of the payload.
        payload: DaSolution,
        /// The solution of the backend.
        backend: DaSolution,
    },
    /// A chunk of the payload is not available on the DA backend.
    #[error("chunk {index} not found at position {position}")]
    ChunkNotFound {
        /// The index of the chunk in the payload.
        index: usize,
        /// The position of the chunk's batch.
        position: BatchPosition,
    },
}
