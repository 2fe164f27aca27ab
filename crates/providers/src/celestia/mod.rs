//! A [`DaBackend`] posting blobs to Celestia through a celestia-node JSON-RPC endpoint.

mod namespace;
pub use namespace::{Namespace, NamespaceError, NAMESPACE_SIZE, NAMESPACE_V0_ID_SIZE};

mod types;
use types::{CelestiaBlob, SubmitOptions};

use crate::{DaBackend, DaProviderError};

use alloy_primitives::Bytes;
use alloy_rpc_client::RpcClient;
use alloy_transport::{RpcError, TransportResult};
use alloy_transport_http::Http;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use proof_da_primitives::{BatchPosition, Commitment, DaSolution, SubmissionResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// The max blob size method of the DA module.
const MAX_BLOB_SIZE_METHOD: &str = "da.MaxBlobSize";

/// The submit method of the blob module.
const SUBMIT_METHOD: &str = "blob.Submit";

/// The get all method of the blob module.
const GET_ALL_METHOD: &str = "blob.GetAll";

/// The get method of the blob module.
const GET_METHOD: &str = "blob.Get";

/// An implementation of a [`DaBackend`] using a celestia-node client.
#[derive(Debug, Clone)]
pub struct CelestiaDaProvider {
    /// The inner rpc client.
    inner: RpcClient,
    /// The namespace blobs are posted to.
    namespace: Namespace,
}

impl CelestiaDaProvider {
    /// Creates a new [`CelestiaDaProvider`] from the provided url, optional auth token and
    /// namespace.
    pub fn new_http(
        url: reqwest::Url,
        auth_token: Option<&str>,
        namespace: Namespace,
    ) -> Result<Self, DaProviderError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = auth_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| DaProviderError::InvalidAuthToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { inner: RpcClient::new(Http::with_client(client, url), false), namespace })
    }

    /// Returns the namespace the provider posts to.
    pub const fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns all the blobs in the provider's namespace at the provided height.
    async fn blobs_at(&self, height: u64) -> TransportResult<Vec<CelestiaBlob>> {
        let blobs: Option<Vec<CelestiaBlob>> =
            self.inner.request(GET_ALL_METHOD, (height, [self.namespace])).await?;
        Ok(blobs.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl DaBackend for CelestiaDaProvider {
    fn solution(&self) -> DaSolution {
        DaSolution::Celestia
    }

    async fn max_blob_size(&self) -> Result<u64, DaProviderError> {
        Ok(self.inner.request_noparams(MAX_BLOB_SIZE_METHOD).await?)
    }

    async fn submit(&self, blobs: &[&[u8]]) -> Result<SubmissionResult, DaProviderError> {
        if blobs.is_empty() {
            return Err(DaProviderError::EmptyBatch)
        }

        let request =
            blobs.iter().map(|data| CelestiaBlob::new(self.namespace, data)).collect::<Vec<_>>();
        tracing::debug!(target: "proof_da::providers", namespace = %self.namespace, blobs = blobs.len(), "submitting blobs to celestia");

        let height: u64 =
            self.inner.request(SUBMIT_METHOD, (request, SubmitOptions::default())).await?;
        let position = BatchPosition(height);
        tracing::debug!(target: "proof_da::providers", %position, "blobs included");

        // the node computes the commitments, read them back from the inclusion height.
        let included = self.blobs_at(height).await.map_err(|source| {
            tracing::warn!(target: "proof_da::providers", %position, ?source, "failed to read back included blobs");
            DaProviderError::ReadBack { position, source }
        })?;
        let commitments = match_commitments(blobs, &included, position)?;

        Ok(SubmissionResult::new(position, commitments))
    }

    async fn blob(
        &self,
        position: BatchPosition,
        commitment: Commitment,
    ) -> Result<Option<Bytes>, DaProviderError> {
        let params = (position.0, self.namespace, BASE64.encode(commitment));
        match self.inner.request::<_, CelestiaBlob>(GET_METHOD, params).await {
            Ok(blob) => Ok(Some(blob.data.into())),
            Err(RpcError::ErrorResp(payload)) if payload.message.contains("not found") => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Matches each submitted blob, in order, to the first unused included blob holding the same
/// data and returns the commitments of the matches.
fn match_commitments(
    submitted: &[&[u8]],
    included: &[CelestiaBlob],
    position: BatchPosition,
) -> Result<Vec<Commitment>, DaProviderError> {
    let mut used = vec![false; included.len()];
    let mut commitments = Vec::with_capacity(submitted.len());

    for (index, data) in submitted.iter().enumerate() {
        let matched = included
            .iter()
            .enumerate()
            .position(|(i, blob)| !used[i] && blob.data.as_slice() == *data)
            .ok_or(DaProviderError::MissingCommitment { index, position })?;
        used[matched] = true;

        let commitment = &included[matched].commitment;
        let commitment = Commitment::try_from(commitment.as_slice())
            .map_err(|_| DaProviderError::InvalidCommitment(commitment.len()))?;
        commitments.push(commitment);
    }

    Ok(commitments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::{
        io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
        net::{TcpListener, TcpStream},
    };

    /// The base64 encoding of the `proof` namespace.
    const PROOF_NAMESPACE: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAcHJvb2Y=";

    /// A JSON-RPC request received by the local node.
    #[derive(Debug, Clone)]
    struct NodeRequest {
        method: String,
        params: Value,
        authorization: Option<String>,
    }

    type NodeReply = fn(&str, &Value) -> Value;

    /// Serves the replies of a celestia-node on a local port and records the received requests.
    async fn spawn_node(
        reply: NodeReply,
    ) -> eyre::Result<(reqwest::Url, Arc<Mutex<Vec<NodeRequest>>>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?).parse()?;
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve_connection(stream, reply, recorded).await;
                });
            }
        });

        Ok((url, requests))
    }

    async fn serve_connection(
        stream: TcpStream,
        reply: NodeReply,
        recorded: Arc<Mutex<Vec<NodeRequest>>>,
    ) -> eyre::Result<()> {
        let (read, mut write) = stream.into_split();
        let mut read = BufReader::new(read);

        loop {
            // request line.
            let mut line = String::new();
            if read.read_line(&mut line).await? == 0 {
                return Ok(())
            }

            let mut content_length = 0;
            let mut authorization = None;
            loop {
                line.clear();
                read.read_line(&mut line).await?;
                let header = line.trim_end();
                if header.is_empty() {
                    break
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse()?;
                    } else if name.eq_ignore_ascii_case("authorization") {
                        authorization = Some(value.trim().to_string());
                    }
                }
            }

            let mut body = vec![0u8; content_length];
            read.read_exact(&mut body).await?;
            let request: Value = serde_json::from_slice(&body)?;
            let method = request["method"].as_str().unwrap_or_default().to_string();
            let params = request["params"].clone();

            let mut response = reply(&method, &params);
            response["jsonrpc"] = json!("2.0");
            response["id"] = request["id"].clone();
            recorded.lock().push(NodeRequest { method, params, authorization });

            let body = serde_json::to_vec(&response)?;
            let head = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n",
                body.len()
            );
            write.write_all(head.as_bytes()).await?;
            write.write_all(&body).await?;
        }
    }

    fn included_json(data: &[u8], commitment: u8) -> Value {
        json!({
            "namespace": PROOF_NAMESPACE,
            "data": BASE64.encode(data),
            "share_version": 0,
            "commitment": BASE64.encode([commitment; 32]),
            "index": 3
        })
    }

    fn not_found() -> Value {
        json!({ "error": { "code": 1, "message": "blob: not found" } })
    }

    fn node_reply(method: &str, params: &Value) -> Value {
        match method {
            MAX_BLOB_SIZE_METHOD => json!({ "result": 1_973_786 }),
            SUBMIT_METHOD => json!({ "result": 42 }),
            // blobs of other submitters and out of submission order.
            GET_ALL_METHOD => json!({
                "result": [
                    included_json(b"other", 9),
                    included_json(b"second", 2),
                    included_json(b"first", 1),
                ]
            }),
            GET_METHOD if params[2] == BASE64.encode([1u8; 32]) => {
                json!({ "result": included_json(b"first", 1) })
            }
            GET_METHOD => not_found(),
            _ => json!({ "error": { "code": -32601, "message": "unknown method" } }),
        }
    }

    fn failing_read_back_reply(method: &str, _params: &Value) -> Value {
        match method {
            SUBMIT_METHOD => json!({ "result": 42 }),
            _ => json!({ "error": { "code": 1, "message": "header: syncing" } }),
        }
    }

    #[tokio::test]
    async fn test_should_post_and_fetch_blobs() -> eyre::Result<()> {
        let (url, requests) = spawn_node(node_reply).await?;
        let provider = CelestiaDaProvider::new_http(url, Some("secret"), Namespace::v0(b"proof")?)?;

        assert_eq!(provider.max_blob_size().await?, 1_973_786);

        let result = provider.submit(&[b"first".as_slice(), b"second".as_slice()]).await?;
        assert_eq!(result.position, BatchPosition(42));
        assert_eq!(result.commitments, vec![B256::repeat_byte(1), B256::repeat_byte(2)]);

        let blob = provider.blob(BatchPosition(42), B256::repeat_byte(1)).await?;
        assert_eq!(blob, Some(Bytes::from_static(b"first")));
        let missing = provider.blob(BatchPosition(42), B256::repeat_byte(7)).await?;
        assert_eq!(missing, None);

        let requests = requests.lock().clone();
        let methods = requests.iter().map(|request| request.method.as_str()).collect::<Vec<_>>();
        assert_eq!(
            methods,
            [MAX_BLOB_SIZE_METHOD, SUBMIT_METHOD, GET_ALL_METHOD, GET_METHOD, GET_METHOD]
        );
        assert!(requests
            .iter()
            .all(|request| request.authorization.as_deref() == Some("Bearer secret")));

        assert_eq!(
            requests[1].params,
            json!([
                [
                    { "namespace": PROOF_NAMESPACE, "data": BASE64.encode(b"first"), "share_version": 0 },
                    { "namespace": PROOF_NAMESPACE, "data": BASE64.encode(b"second"), "share_version": 0 }
                ],
                {}
            ])
        );
        assert_eq!(requests[2].params, json!([42, [PROOF_NAMESPACE]]));
        assert_eq!(requests[3].params, json!([42, PROOF_NAMESPACE, BASE64.encode([1u8; 32])]));
        assert_eq!(requests[4].params, json!([42, PROOF_NAMESPACE, BASE64.encode([7u8; 32])]));

        Ok(())
    }

    #[tokio::test]
    async fn test_read_back_failure_keeps_position() -> eyre::Result<()> {
        let (url, requests) = spawn_node(failing_read_back_reply).await?;
        let provider = CelestiaDaProvider::new_http(url, None, Namespace::v0(b"proof")?)?;

        let err = provider.submit(&[b"first".as_slice()]).await.unwrap_err();

        assert!(matches!(err, DaProviderError::ReadBack { position: BatchPosition(42), .. }));
        let requests = requests.lock().clone();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|request| request.authorization.is_none()));

        Ok(())
    }

    #[test]
    fn test_should_reject_invalid_auth_token() {
        let err = CelestiaDaProvider::new_http(
            "http://localhost:26658".parse().unwrap(),
            Some("bad\ntoken"),
            Namespace::v0(b"proof").unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, DaProviderError::InvalidAuthToken));
    }

    fn included(namespace: Namespace, data: &[u8], commitment: u8) -> CelestiaBlob {
        CelestiaBlob { commitment: vec![commitment; 32], ..CelestiaBlob::new(namespace, data) }
    }

    #[test]
    fn test_match_commitments_in_submission_order() {
        let namespace = Namespace::v0(b"proof").unwrap();
        let submitted: Vec<&[u8]> =
            vec![b"aaaa".as_slice(), b"bbbb".as_slice(), b"aaaa".as_slice()];
        // other blobs and duplicate data from the same height.
        let blobs = vec![
            included(namespace, b"zzzz", 9),
            included(namespace, b"aaaa", 1),
            included(namespace, b"bbbb", 2),
            included(namespace, b"aaaa", 3),
        ];

        let commitments = match_commitments(&submitted, &blobs, BatchPosition(5)).unwrap();

        assert_eq!(
            commitments,
            vec![B256::repeat_byte(1), B256::repeat_byte(2), B256::repeat_byte(3)]
        );
    }

    #[test]
    fn test_match_commitments_missing_blob() {
        let namespace = Namespace::v0(b"proof").unwrap();
        let submitted: Vec<&[u8]> = vec![b"aaaa".as_slice(), b"aaaa".as_slice()];
        let blobs = vec![included(namespace, b"aaaa", 1)];

        let err = match_commitments(&submitted, &blobs, BatchPosition(5)).unwrap_err();

        assert!(matches!(
            err,
            DaProviderError::MissingCommitment { index: 1, position: BatchPosition(5) }
        ));
    }

    #[test]
    fn test_match_commitments_invalid_length() {
        let namespace = Namespace::v0(b"proof").unwrap();
        let submitted: Vec<&[u8]> = vec![b"aaaa".as_slice()];
        let blobs = vec![CelestiaBlob {
            commitment: vec![1u8; 20],
            ..CelestiaBlob::new(namespace, b"aaaa")
        }];

        let err = match_commitments(&submitted, &blobs, BatchPosition(5)).unwrap_err();

        assert!(matches!(err, DaProviderError::InvalidCommitment(20)));
    }

    #[tokio::test]
    async fn test_should_reject_empty_batch() -> eyre::Result<()> {
        let provider = CelestiaDaProvider::new_http(
            "http://localhost:26658".parse()?,
            None,
            Namespace::v0(b"proof")?,
        )?;

        let err = provider.submit(&[]).await.unwrap_err();
        assert!(matches!(err, DaProviderError::EmptyBatch));

        Ok(())
    }

    // Requires a celestia-node light node with a funded account, see
    // <https://docs.celestia.org/how-to-guides/light-node>.
    const CELESTIA_NODE_URL: &str = "http://localhost:26658";

    #[tokio::test]
    #[ignore]
    async fn test_should_submit_and_read_back() -> eyre::Result<()> {
        let token = std::env::var("CELESTIA_NODE_AUTH_TOKEN").ok();
        let provider = CelestiaDaProvider::new_http(
            CELESTIA_NODE_URL.parse()?,
            token.as_deref(),
            Namespace::v0(b"proof-da")?,
        )?;

        let max_blob_size = provider.max_blob_size().await?;
        assert!(max_blob_size > 0);

        let blobs: Vec<&[u8]> = vec![b"first chunk".as_slice(), b"second chunk".as_slice()];
        let result = provider.submit(&blobs).await?;
        assert_eq!(result.commitments.len(), 2);

        for (data, commitment) in blobs.iter().zip(result.commitments) {
            let blob = provider.blob(result.position, commitment).await?;
            assert_eq!(blob.as_ref().map(|b| &b[..]), Some(*data));
        }

        Ok(())
    }
}
