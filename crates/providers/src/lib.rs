//! The crate exposes the [`DaBackend`] trait along with the data availability backends proofs
//! can be posted to.

pub use args::{DaArgs, DaSource};
mod args;

pub use backend::DaBackend;
mod backend;

pub use celestia::{
    CelestiaDaProvider, Namespace, NamespaceError, NAMESPACE_SIZE, NAMESPACE_V0_ID_SIZE,
};
mod celestia;

pub use error::DaProviderError;
mod error;

pub use mock::{MockDaProvider, DEFAULT_MOCK_MAX_BLOB_SIZE};
mod mock;
