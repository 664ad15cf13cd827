//! Errors raised while constructing decoders.

use thiserror::Error;

/// Errors that can occur while building a decoder.
///
/// These are reported by constructors, never at decode time: a decoder that
/// was built successfully always produces a [`DecodeResult`](crate::DecodeResult).
#[derive(Debug, Error)]
pub enum BuildError {
    /// A regular expression pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
