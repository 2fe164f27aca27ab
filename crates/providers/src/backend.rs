use crate::DaProviderError;

use alloy_primitives::Bytes;
use proof_da_primitives::{BatchPosition, Commitment, DaSolution, SubmissionResult};

/// An instance of the trait can be used to post blobs to, and read blobs from, a data
/// availability layer.
#[async_trait::async_trait]
#[auto_impl::auto_impl(Arc, &)]
pub trait DaBackend: Sync + Send {
    /// Returns the [`DaSolution`] the backend posts to.
    fn solution(&self) -> DaSolution;

    /// Returns the current maximum size of a single blob, in bytes.
    async fn max_blob_size(&self) -> Result<u64, DaProviderError>;

    /// Submits the blobs as a single batch. On success, returns the position of the batch and one
    /// commitment per blob, in submission order.
    async fn submit(&self, blobs: &[&[u8]]) -> Result<SubmissionResult, DaProviderError>;

    /// Returns the blob submitted at the provided position with the provided commitment, if any.
    async fn blob(
        &self,
        position: BatchPosition,
        commitment: Commitment,
    ) -> Result<Option<Bytes>, DaProviderError>;
}
