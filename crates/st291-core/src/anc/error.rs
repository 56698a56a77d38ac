use thiserror::Error;

use crate::bits::BitError;
use crate::delegate::PayloadError;

/// Errors returned by ancillary packet decoding and encoding.
///
/// # Examples
/// ```
/// use st291_core::AncError;
///
/// let err = AncError::TruncatedInput { requested: 8, remaining: 3 };
/// assert!(err.to_string().contains("truncated input"));
/// ```
#[derive(Debug, Error)]
pub enum AncError {
    #[error("truncated input: need {requested} bits, {remaining} remaining")]
    TruncatedInput { requested: usize, remaining: usize },
    #[error("delegated payload needs a {needed}-word descriptor, word count is {word_count}")]
    ShortDescriptor { needed: usize, word_count: u8 },
    #[error("word count {word_count} implies {expected} payload bits, raw payload has {actual}")]
    InconsistentWordCount {
        word_count: u8,
        expected: usize,
        actual: usize,
    },
    #[error("delegated payload of {byte_len} bytes overflows the 8-bit word count")]
    WordCountOverflow { byte_len: usize },
    #[error("payload codec error: {0}")]
    Payload(#[from] PayloadError),
    #[error("bit access error: {0}")]
    Bits(BitError),
}

impl From<BitError> for AncError {
    fn from(value: BitError) -> Self {
        match value {
            BitError::Truncated {
                requested,
                remaining,
            } => AncError::TruncatedInput {
                requested,
                remaining,
            },
            other => AncError::Bits(other),
        }
    }
}
