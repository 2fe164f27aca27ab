//! Splitting of proofs into DA blob sized chunks.

use crate::PosterError;

/// Splits the data into consecutive chunks of at most `max_size` bytes.
///
/// Every chunk but the last holds exactly `max_size` bytes and the chunks concatenate back to
/// `data`. Empty data yields no chunk.
pub fn split_into_chunks(data: &[u8], max_size: usize) -> Result<Vec<&[u8]>, PosterError> {
    if max_size == 0 {
        return Err(PosterError::InvalidConfiguration("max chunk size must be positive"))
    }
    Ok(data.chunks(max_size).collect())
}
