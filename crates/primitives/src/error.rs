/// Error returned when decoding a [`crate::DaSolution`] from an unknown tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDaSolution(pub u8);

impl core::fmt::Display for UnknownDaSolution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown DA solution tag: {}", self.0)
    }
}

impl std::error::Error for UnknownDaSolution {}
