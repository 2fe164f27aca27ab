//! JSON-RPC types of the celestia-node blob module.

use super::Namespace;

/// The share version used for all submitted blobs.
pub(crate) const SHARE_VERSION_ZERO: u32 = 0;

/// A blob as exchanged with the celestia-node JSON-RPC API. Byte fields are base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub(crate) struct CelestiaBlob {
    /// The namespace of the blob.
    pub(crate) namespace: Namespace,
    /// The blob data.
    #[serde(with = "base64_bytes")]
    pub(crate) data: Vec<u8>,
    /// The share version of the blob.
    pub(crate) share_version: u32,
    /// The commitment of the blob. Computed by the node, left empty on submission.
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Vec::is_empty")]
    pub(crate) commitment: Vec<u8>,
}

impl CelestiaBlob {
    /// Returns a new [`CelestiaBlob`] ready for submission.
    pub(crate) fn new(namespace: Namespace, data: &[u8]) -> Self {
        Self {
            namespace,
            data: data.to_vec(),
            share_version: SHARE_VERSION_ZERO,
            commitment: Vec::new(),
        }
    }
}

/// The submit options of `blob.Submit`. Left empty so the node applies its own gas policy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub(crate) struct SubmitOptions {}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    // go encodes nil byte slices as null.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| BASE64.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
            .map(Option::unwrap_or_default)
    }
}
