use crate::{DaBackend, DaProviderError};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};

use alloy_primitives::{keccak256, Bytes};
use parking_lot::Mutex;
use proof_da_primitives::{BatchPosition, Commitment, DaSolution, SubmissionResult};

/// The default max blob size of the [`MockDaProvider`].
pub const DEFAULT_MOCK_MAX_BLOB_SIZE: u64 = 1_973_786;

/// An in-memory [`DaBackend`].
///
/// Every submitted batch lands at the next position, starting at 1, and every blob is committed
/// to by its keccak256 hash. Failures can be injected on both remote calls.
#[derive(Debug)]
pub struct MockDaProvider {
    solution: DaSolution,
    max_blob_size: AtomicU64,
    last_position: AtomicU64,
    submissions: AtomicUsize,
    fail_max_blob_size: AtomicBool,
    fail_submit: AtomicBool,
    blobs: Mutex<HashMap<(BatchPosition, Commitment), Bytes>>,
}

impl Default for MockDaProvider {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_MAX_BLOB_SIZE)
    }
}

impl MockDaProvider {
    /// Returns a new [`MockDaProvider`] with the provided max blob size.
    pub fn new(max_blob_size: u64) -> Self {
        Self {
            solution: DaSolution::Celestia,
            max_blob_size: AtomicU64::new(max_blob_size),
            last_position: AtomicU64::new(0),
            submissions: AtomicUsize::new(0),
            fail_max_blob_size: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the solution reported by the provider.
    pub fn with_solution(mut self, solution: DaSolution) -> Self {
        self.solution = solution;
        self
    }

    /// Updates the max blob size returned by the provider.
    pub fn set_max_blob_size(&self, max_blob_size: u64) {
        self.max_blob_size.store(max_blob_size, Ordering::Relaxed);
    }

    /// Makes calls to [`DaBackend::max_blob_size`] fail.
    pub fn fail_max_blob_size(&self, fail: bool) {
        self.fail_max_blob_size.store(fail, Ordering::Relaxed);
    }

    /// Makes calls to [`DaBackend::submit`] fail.
    pub fn fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::Relaxed);
    }

    /// Returns the number of calls to [`DaBackend::submit`], including failed ones.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::Relaxed)
    }

    /// Returns the number of stored blobs.
    pub fn stored_blobs(&self) -> usize {
        self.blobs.lock().len()
    }
}

#[async_trait::async_trait]
impl DaBackend for MockDaProvider {
    fn solution(&self) -> DaSolution {
        self.solution
    }

    async fn max_blob_size(&self) -> Result<u64, DaProviderError> {
        if self.fail_max_blob_size.load(Ordering::Relaxed) {
            return Err(DaProviderError::Other("mock max blob size failure"))
        }
        Ok(self.max_blob_size.load(Ordering::Relaxed))
    }

    async fn submit(&self, blobs: &[&[u8]]) -> Result<SubmissionResult, DaProviderError> {
        self.submissions.fetch_add(1, Ordering::Relaxed);
        if self.fail_submit.load(Ordering::Relaxed) {
            return Err(DaProviderError::Other("mock submit failure"))
        }
        if blobs.is_empty() {
            return Err(DaProviderError::EmptyBatch)
        }

        let position = BatchPosition(self.last_position.fetch_add(1, Ordering::Relaxed) + 1);
        let mut store = self.blobs.lock();
        let commitments = blobs
            .iter()
            .map(|data| {
                let commitment = keccak256(data);
                store.insert((position, commitment), Bytes::copy_from_slice(data));
                commitment
            })
            .collect();

        Ok(SubmissionResult::new(position, commitments))
    }

    async fn blob(
        &self,
        position: BatchPosition,
        commitment: Commitment,
    ) -> Result<Option<Bytes>, DaProviderError> {
        Ok(self.blobs.lock().get(&(position, commitment)).cloned())
    }
}
