//! Errors of the byte format decoder.

use thiserror::Error;

/// Reasons a serialized board can fail to decode.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before the board was complete.
    #[error("serialized board ends prematurely")]
    UnexpectedEnd,
    /// The label bytes are not valid UTF-8.
    #[error("board label is not valid UTF-8")]
    BadLabel,
    /// The candidate stream contains a byte that is neither a digit marker,
    /// a cell index nor the terminator.
    #[error("invalid byte {0} in candidate stream")]
    BadCandidateMarker(u8),
}
