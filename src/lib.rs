//! # Decoding
//!
//! Composable decoders that turn untyped JSON values into typed Rust values,
//! failing with a precise, path-annotated error when the input does not have
//! the expected shape.
//!
//! ## Overview
//!
//! A decoder is a small immutable value that knows how to read one shape of
//! input. Primitive decoders match a type or a pattern; compound decoders
//! read object keys, array elements, alternatives and dependent shapes by
//! delegating to sub-decoders. Decoding stops at the first failure, and every
//! compound decoder the failure passes through records where it happened, so
//! a deep mismatch reads like `Error at .users.0.email: expected String, got Null`.
//!
//! ## Core Types
//!
//! - [`Decoder`]: The trait every decoder implements
//! - [`Decoders`]: Entry point for creating decoders
//! - [`Failure`]: A decode failure with its message, kind and path
//! - [`DecodeResult`]: The result of running a decoder
//! - [`DecodePath`]: The location of a failure inside the input
//!
//! ## Example
//!
//! ```rust
//! use decoding::{decode, Decoder, Decoders};
//! use serde_json::json;
//!
//! let point = Decoders::map(
//!     (
//!         Decoders::field("x", Decoders::integer()),
//!         Decoders::field("y", Decoders::integer()),
//!     ),
//!     |(x, y)| (x, y),
//! );
//! let polygon = Decoders::field("points", Decoders::array(point));
//!
//! let value = json!({ "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 2 }] });
//! assert_eq!(decode(&polygon, &value), Ok(vec![(0, 0), (1, 2)]));
//!
//! let value = json!({ "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": "2" }] });
//! let failure = decode(&polygon, &value).unwrap_err();
//! assert_eq!(
//!     failure.to_string(),
//!     "Error at .points.1.y: expected Integer, got String"
//! );
//! ```
//!
//! ## Panicking callbacks
//!
//! Closures handed to `map`, `and_then` and `from_fn` are caller code. If one
//! panics, the panic is caught and `decode` returns a
//! [`FailureKind::Callback`] failure. The panic hook runs first, though, so
//! the default hook still prints the panic message to stderr. Applications
//! that decode untrusted input with panicking callbacks can install a quieter
//! hook with [`std::panic::set_hook`]:
//!
//! ```rust
//! use decoding::{decode, Decoders, FailureKind};
//! use serde_json::json;
//!
//! std::panic::set_hook(Box::new(|info| {
//!     tracing::error!(panic = %info, "panic");
//! }));
//!
//! let decoder = Decoders::map(Decoders::integer(), |n| -> i64 {
//!     if n < 0 {
//!         panic!("negative input");
//!     }
//!     n
//! });
//!
//! let failure = decode(&decoder, &json!(-1)).unwrap_err();
//! assert_eq!(failure.kind(), FailureKind::Callback);
//! assert_eq!(failure.to_string(), "error in map block: negative input");
//!
//! let _ = std::panic::take_hook();
//! ```

pub mod decoders;
pub mod error;
pub mod path;
pub mod result;
pub mod value;

pub use decoders::{
    AndThen, Any, Array, At, BoxDecoder, Decoder, Decoders, Fail, Field, FromFn, Hash, Index,
    Map, Match, Pass, Record, Succeed, TryMap,
};
pub use error::{BuildError, Failure, FailureKind};
pub use path::{DecodePath, PathSegment};
pub use result::{all, DecodeResult, ResultExt};
pub use value::{Symbol, ValueKind};

use serde_json::Value;

/// Runs `decoder` against `value`.
///
/// Every mismatch is returned as a [`Failure`]; decoding never panics because
/// of the input, and panics raised by caller-supplied callbacks are reported
/// as failures too.
///
/// # Example
///
/// ```rust
/// use decoding::{decode, Decoders};
/// use serde_json::json;
///
/// let decoder = Decoders::field("a", Decoders::field("b", Decoders::integer()));
///
/// assert_eq!(decode(&decoder, &json!({ "a": { "b": 1 } })), Ok(1));
///
/// let failure = decode(&decoder, &json!({ "a": { "b": "x" } })).unwrap_err();
/// assert_eq!(failure.to_string(), "Error at .a.b: expected Integer, got String");
/// ```
pub fn decode<D>(decoder: &D, value: &Value) -> DecodeResult<D::Output>
where
    D: Decoder + ?Sized,
{
    tracing::trace!(kind = %ValueKind::of(value), "decoding value");

    decoder.decode(value).map_err(|failure| {
        tracing::debug!(error = %failure, code = failure.kind().code(), "decode failed");
        failure
    })
}
