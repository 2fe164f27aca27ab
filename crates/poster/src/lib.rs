//! Posting of proofs to a data availability layer.
//!
//! A proof is split into chunks bounded by the DA layer's current maximum blob size, the chunks
//! are submitted as a single batch and the returned commitments are assembled into a
//! [`DaPayload`] which lets a verifier locate every chunk of the proof.
//!
//! Every call is a single, independent chain of backend requests: nothing is retried and nothing
//! is cached between calls. Dropping the returned future cancels the call; callers wanting a
//! deadline can wrap it in a timeout.

use std::time::Instant;

use alloy_primitives::Bytes;
use proof_da_primitives::DaPayload;
use proof_da_providers::DaBackend;

mod assembler;
pub use assembler::{assemble, build_payload};

mod chunker;
pub use chunker::split_into_chunks;

mod error;
pub use error::PosterError;

mod metrics;
pub use metrics::PosterMetrics;

mod retrieval;
pub use retrieval::retrieve_proof;

/// The proof poster posts proofs to, and retrieves proofs from, a [`DaBackend`].
pub struct ProofPoster<B> {
    /// The DA backend.
    backend: B,
    /// The poster metrics.
    metrics: PosterMetrics,
}

impl<B: DaBackend> ProofPoster<B> {
    /// Returns a new [`ProofPoster`] posting to the provided backend.
    pub fn new(backend: B) -> Self {
        Self { backend, metrics: PosterMetrics::default() }
    }

    /// Returns a reference to the backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Posts the proof to the DA layer and returns the [`DaPayload`] locating its chunks.
    ///
    /// The maximum blob size is fetched from the backend on every call. Empty proofs are rejected
    /// before any backend call.
    pub async fn post_proof(&self, proof: &[u8]) -> Result<DaPayload, PosterError> {
        let now = Instant::now();
        let result = self.try_post_proof(proof).await;

        match &result {
            Ok(payload) => {
                self.metrics.post_duration.record(now.elapsed().as_secs_f64());
                self.metrics.posted_proofs.increment(1);
                self.metrics.posted_chunks.increment(payload.len() as u64);
                self.metrics.posted_bytes.increment(proof.len() as u64);
                tracing::info!(target: "proof_da::poster", solution = %payload.solution(), position = ?payload.position(), chunks = payload.len(), "posted proof");
            }
            Err(err) => {
                self.metrics.failed_posts.increment(1);
                tracing::warn!(target: "proof_da::poster", ?err, size = proof.len(), "failed to post proof");
            }
        }

        result
    }

    async fn try_post_proof(&self, proof: &[u8]) -> Result<DaPayload, PosterError> {
        if proof.is_empty() {
            return Err(PosterError::InvalidConfiguration("empty proof"))
        }

        let max_blob_size =
            self.backend.max_blob_size().await.map_err(PosterError::BackendUnavailable)?;
        let max_chunk_size = usize::try_from(max_blob_size).unwrap_or(usize::MAX);

        let chunks = split_into_chunks(proof, max_chunk_size)?;
        tracing::debug!(target: "proof_da::poster", size = proof.len(), max_blob_size, chunks = chunks.len(), "posting proof chunks");

        assemble(&self.backend, &chunks).await
    }

    /// Fetches the chunks located by the payload and returns the reassembled proof.
    pub async fn retrieve_proof(&self, payload: &DaPayload) -> Result<Bytes, PosterError> {
        let proof = retrieve_proof(&self.backend, payload).await?;
        tracing::debug!(target: "proof_da::poster", chunks = payload.len(), size = proof.len(), "retrieved proof");
        Ok(proof)
    }
}

impl<B: std::fmt::Debug> std::fmt::Debug for ProofPoster<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofPoster").field("backend", &self.backend).finish()
    }
}
