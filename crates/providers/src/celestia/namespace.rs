use alloy_primitives::hex;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use core::str::FromStr;

/// The size of a Celestia namespace.
pub const NAMESPACE_SIZE: usize = 29;

/// The maximum size of the user-specified part of a version 0 namespace.
pub const NAMESPACE_V0_ID_SIZE: usize = 10;

/// An error occurring when building a [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    /// The namespace is not valid hex.
    #[error("invalid namespace hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The namespace id is longer than allowed.
    #[error("namespace id too long: {0} bytes, max {max}", max = NAMESPACE_V0_ID_SIZE)]
    IdTooLong(usize),
    /// The namespace is not a version 0 namespace.
    #[error("unsupported namespace version or layout")]
    UnsupportedVersion,
    /// The all-zero namespace id is reserved.
    #[error("reserved namespace id")]
    Reserved,
}

/// A version 0 Celestia namespace: a zero version byte, 18 zero bytes and a 10 byte id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace([u8; NAMESPACE_SIZE]);

impl Namespace {
    /// Returns a version 0 [`Namespace`] from the provided id, left padded with zeros.
    pub fn v0(id: &[u8]) -> Result<Self, NamespaceError> {
        if id.len() > NAMESPACE_V0_ID_SIZE {
            return Err(NamespaceError::IdTooLong(id.len()))
        }
        if id.iter().all(|b| *b == 0) {
            return Err(NamespaceError::Reserved)
        }

        let mut bytes = [0u8; NAMESPACE_SIZE];
        bytes[NAMESPACE_SIZE - id.len()..].copy_from_slice(id);
        Ok(Self(bytes))
    }

    /// Returns the raw bytes of the namespace.
    pub const fn as_bytes(&self) -> &[u8; NAMESPACE_SIZE] {
        &self.0
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    /// Parses either a full 29 byte namespace or a namespace id from hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        if bytes.len() != NAMESPACE_SIZE {
            return Self::v0(&bytes)
        }

        let (prefix, id) = bytes.split_at(NAMESPACE_SIZE - NAMESPACE_V0_ID_SIZE);
        if prefix.iter().any(|b| *b != 0) {
            return Err(NamespaceError::UnsupportedVersion)
        }
        Self::v0(id)
    }
}

impl core::fmt::Display for Namespace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl serde::Serialize for Namespace {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(self.0))
    }
}

impl<'de> serde::Deserialize<'de> for Namespace {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = BASE64.decode(encoded).map_err(serde::de::Error::custom)?;
        let bytes = <[u8; NAMESPACE_SIZE]>::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::invalid_length(bytes.len(), &"29 bytes"))?;
        Ok(Self(bytes))
    }
}
