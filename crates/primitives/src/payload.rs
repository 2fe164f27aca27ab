//! The DA payload handed to the verifier.

use crate::DaSolution;
use alloy_primitives::B256;

/// An opaque commitment to a single chunk, as returned by the DA backend.
pub type Commitment = B256;

/// The position at which a batch of chunks landed in the DA backend's ledger. For Celestia this
/// is the block height.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
    derive_more::Deref,
    serde::Serialize,
    serde::Deserialize,
)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(transparent)]
pub struct BatchPosition(pub u64);

/// The result of submitting a batch of chunks to a DA backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    /// The position of the whole batch.
    pub position: BatchPosition,
    /// One commitment per submitted chunk, in submission order.
    pub commitments: Vec<Commitment>,
}

impl SubmissionResult {
    /// Returns a new [`SubmissionResult`].
    pub const fn new(position: BatchPosition, commitments: Vec<Commitment>) -> Self {
        Self { position, commitments }
    }
}

/// A single chunk entry of a [`DaPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DaPayloadChunk {
    /// The commitment of the chunk.
    pub proof_associated_data: Commitment,
    /// The position of the batch the chunk was submitted in.
    pub index: BatchPosition,
}

impl DaPayloadChunk {
    /// Returns a new [`DaPayloadChunk`].
    pub const fn new(proof_associated_data: Commitment, index: BatchPosition) -> Self {
        Self { proof_associated_data, index }
    }
}

/// The payload locating every chunk of a proof on the DA layer.
///
/// Chunks are ordered as in the proof: the commitment at index `i` belongs to the `i`-th chunk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DaPayload {
    /// The solution the chunks were posted to.
    #[serde(rename = "SolutionTag")]
    solution: DaSolution,
    /// The ordered chunks.
    #[serde(rename = "Chunks")]
    chunks: Vec<DaPayloadChunk>,
}

impl DaPayload {
    /// Returns a new [`DaPayload`].
    pub const fn new(solution: DaSolution, chunks: Vec<DaPayloadChunk>) -> Self {
        Self { solution, chunks }
    }

    /// Returns the solution the payload was posted to.
    pub const fn solution(&self) -> DaSolution {
        self.solution
    }

    /// Returns the ordered chunks of the payload.
    pub fn chunks(&self) -> &[DaPayloadChunk] {
        &self.chunks
    }

    /// Returns the number of chunks in the payload.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the payload holds no chunk.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns the position of the batch, if the payload holds any chunk.
    pub fn position(&self) -> Option<BatchPosition> {
        self.chunks.first().map(|chunk| chunk.index)
    }

    /// Returns an iterator over the chunk commitments, in proof order.
    pub fn commitments(&self) -> impl Iterator<Item = &Commitment> + '_ {
        self.chunks.iter().map(|chunk| &chunk.proof_associated_data)
    }

    /// Consumes the payload and returns its chunks.
    pub fn into_chunks(self) -> Vec<DaPayloadChunk> {
        self.chunks
    }
}

#[cfg(feature = "arbitrary")]
mod arbitrary_impl {
    use super::*;

    impl arbitrary::Arbitrary<'_> for DaPayload {
        fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
            let solution = u.arbitrary::<DaSolution>()?;
            // all chunks of a payload share the position of their batch.
            let position = u.arbitrary::<BatchPosition>()?;
            let count = u.int_in_range(0..=16)?;
            let chunks = (0..count)
                .map(|_| Ok(DaPayloadChunk::new(u.arbitrary::<B256>()?, position)))
                .collect::<arbitrary::Result<Vec<_>>>()?;

            Ok(Self { solution, chunks })
        }
    }
}
