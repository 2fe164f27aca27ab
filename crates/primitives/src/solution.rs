use crate::UnknownDaSolution;

/// The data availability solution a [`crate::DaPayload`] was posted to.
///
/// The verifier identifies the solution by its `u8` tag, which is also how the type is
/// serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum DaSolution {
    /// The proof is carried in the verifier call's calldata.
    #[display("calldata")]
    Calldata = 0,
    /// The proof is posted to EigenDA.
    #[display("eigenda")]
    EigenDa = 1,
    /// The proof is posted to Celestia.
    #[display("celestia")]
    Celestia = 2,
}

impl DaSolution {
    /// Returns the tag of the solution.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl From<DaSolution> for u8 {
    fn from(value: DaSolution) -> Self {
        value.tag()
    }
}

impl TryFrom<u8> for DaSolution {
    type Error = UnknownDaSolution;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Calldata),
            1 => Ok(Self::EigenDa),
            2 => Ok(Self::Celestia),
            tag => Err(UnknownDaSolution(tag)),
        }
    }
}

impl serde::Serialize for DaSolution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.tag())
    }
}

impl<'de> serde::Deserialize<'de> for DaSolution {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = u8::deserialize(deserializer)?;
        Self::try_from(tag).map_err(serde::de::Error::custom)
    }
}
