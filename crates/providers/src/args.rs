use crate::{CelestiaDaProvider, DaBackend, MockDaProvider, Namespace, DEFAULT_MOCK_MAX_BLOB_SIZE};
use std::sync::Arc;

use eyre::OptionExt;

/// The data availability layer proofs are posted to.
#[derive(Debug, clap::ValueEnum, Default, Clone, Copy, PartialEq, Eq)]
pub enum DaSource {
    /// A celestia-node JSON-RPC endpoint.
    #[default]
    Celestia,
    /// In-memory mocked DA layer.
    Mock,
}

/// The arguments configuring the DA backend.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct DaArgs {
    /// The DA layer to post proofs to.
    #[arg(
        long = "da.source",
        id = "da_source",
        value_name = "DA_SOURCE",
        env = "DA_SOURCE",
        value_enum,
        default_value_t = DaSource::Celestia
    )]
    pub source: DaSource,
    /// The URL of the DA node.
    #[arg(long = "da.url", id = "da_url", value_name = "DA_URL", env = "DA_URL")]
    pub url: Option<reqwest::Url>,
    /// The auth token for the DA node.
    #[arg(
        long = "da.auth-token",
        id = "da_auth_token",
        value_name = "DA_AUTH_TOKEN",
        env = "DA_AUTH_TOKEN",
        hide_env_values = true
    )]
    pub auth_token: Option<String>,
    /// The hex encoded namespace, or namespace id, to post blobs to.
    #[arg(
        long = "da.namespace",
        id = "da_namespace",
        value_name = "DA_NAMESPACE",
        env = "DA_NAMESPACE"
    )]
    pub namespace: Option<Namespace>,
    /// The max blob size reported by the mocked DA layer.
    #[arg(
        long = "da.mock-max-blob-size",
        id = "da_mock_max_blob_size",
        value_name = "DA_MOCK_MAX_BLOB_SIZE",
        env = "DA_MOCK_MAX_BLOB_SIZE",
        default_value_t = DEFAULT_MOCK_MAX_BLOB_SIZE
    )]
    pub mock_max_blob_size: u64,
}

impl Default for DaArgs {
    fn default() -> Self {
        Self {
            source: DaSource::default(),
            url: None,
            auth_token: None,
            namespace: None,
            mock_max_blob_size: DEFAULT_MOCK_MAX_BLOB_SIZE,
        }
    }
}

impl DaArgs {
    /// Returns an [`Arc<dyn DaBackend>`] for the configured source.
    pub fn backend(&self) -> eyre::Result<Arc<dyn DaBackend>> {
        Ok(match self.source {
            DaSource::Celestia => Arc::new(CelestiaDaProvider::new_http(
                self.url.clone().ok_or_eyre("missing url for celestia DA provider")?,
                self.auth_token.as_deref(),
                self.namespace.ok_or_eyre("missing namespace for celestia DA provider")?,
            )?),
            DaSource::Mock => {
                if self.mock_max_blob_size == 0 {
                    eyre::bail!("mock max blob size must be positive")
                }
                Arc::new(MockDaProvider::new(self.mock_max_blob_size))
            }
        })
    }
}
