//! Decode error taxonomy.

use thiserror::Error;

/// Errors surfaced by [`Decoder::decode`](crate::Decoder::decode).
///
/// Only two conditions cross the decode boundary: the terminal
/// end-of-stream signal and a source-level read failure. Parsing-level
/// anomalies (unknown fields, missing colons, stray blank lines, NUL
/// carrying ids) are recovered inside the parser and never surface here.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No more events will ever be produced: the source was exhausted or
    /// the decoder was closed. This is the designated stop-iterating
    /// signal, not an application error.
    #[error("end of stream")]
    Eof,

    /// The source failed to produce bytes for a reason other than
    /// natural exhaustion. The decoder should be closed and discarded
    /// afterwards.
    #[error("stream read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// True for the normal end-of-stream signal, false for failures.
    pub fn is_eof(&self) -> bool {
        matches!(self, DecodeError::Eof)
    }
}
