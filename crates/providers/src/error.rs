use alloy_transport::{RpcError, TransportErrorKind};
use proof_da_primitives::BatchPosition;

/// An error occurring at a [`crate::DaBackend`].
#[derive(Debug, thiserror::Error)]
pub enum DaProviderError {
    /// Error at the JSON-RPC transport.
    #[error("transport error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// Error building the HTTP client.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The auth token can not be used as a header value.
    #[error("invalid auth token")]
    InvalidAuthToken,
    /// The backend does not accept empty batches.
    #[error("empty batch submitted")]
    EmptyBatch,
    /// The batch was included but its blobs could not be read back.
    #[error("failed to read back blobs included at position {position}: {source}")]
    ReadBack {
        /// The position the batch was included at.
        position: BatchPosition,
        /// The transport error.
        #[source]
        source: RpcError<TransportErrorKind>,
    },
    /// A submitted blob could not be found in the batch.
    #[error("missing commitment for blob {index} at position {position}")]
    MissingCommitment {
        /// The index of the blob in the submitted batch.
        index: usize,
        /// The position of the batch.
        position: BatchPosition,
    },
    /// The backend returned a commitment of unexpected length.
    #[error("invalid commitment length: {0}")]
    InvalidCommitment(usize),
    /// Other error.
    #[error("{0}")]
    Other(&'static str),
}
