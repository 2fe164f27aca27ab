//! Primitive types shared by the proof DA poster and its backends.

pub use error::UnknownDaSolution;
mod error;

pub use payload::{BatchPosition, Commitment, DaPayload, DaPayloadChunk, SubmissionResult};
mod payload;

pub use solution::DaSolution;
mod solution;
