//! Decoder combinators for composing decoding logic.
//!
//! This module provides combinators that build a decoder out of other
//! decoders:
//! - [`Map`] / [`TryMap`]: transform a decoded value
//! - [`Any`]: the first of several decoders that succeeds
//! - [`AndThen`]: pick the next decoder from a decoded value
//!
//! Transforms and continuations are caller code. A panic inside one is caught
//! and reported as a [`FailureKind::Callback`] failure instead of unwinding
//! through `decode`.
//!
//! # Example
//!
//! ```rust
//! use decoding::{decode, Decoder, Decoders};
//! use serde_json::json;
//!
//! // Flexible identifier - string or integer
//! let id = Decoders::any(vec![
//!     Decoders::string().boxed(),
//!     Decoders::integer().map(|i| i.to_string()).boxed(),
//! ]);
//!
//! assert_eq!(decode(&id, &json!(12)), Ok("12".to_string()));
//! assert_eq!(decode(&id, &json!("12")), Ok("12".to_string()));
//! ```

use std::fmt::Display;

use serde_json::Value;

use crate::error::{Failure, FailureKind};
use crate::result::{guard, DecodeResult};

use super::traits::{BoxDecoder, Decoder};

const MAP_CONTEXT: &str = "error in map block";
const AND_THEN_CONTEXT: &str = "error in and_then block";

/// Decodes with an inner decoder, then applies a transform to the result.
///
/// To combine several decoded values, map over a tuple of decoders; every
/// element runs against the same input.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let user = Decoders::map(
///     (
///         Decoders::field("id", Decoders::integer()),
///         Decoders::field("name", Decoders::string()),
///     ),
///     |(id, name)| format!("{}:{}", id, name),
/// );
///
/// assert_eq!(
///     user.decode(&json!({ "id": 1, "name": "john" })),
///     Ok("1:john".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Map<D, F> {
    decoder: D,
    f: F,
}

impl<D, F> Map<D, F> {
    /// Creates a decoder that applies `f` to the output of `decoder`.
    pub fn new(decoder: D, f: F) -> Self {
        Self { decoder, f }
    }
}

impl<D, F, U> Decoder for Map<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> U + Send + Sync,
{
    type Output = U;

    fn decode(&self, value: &Value) -> DecodeResult<U> {
        let decoded = self.decoder.decode(value)?;
        guard(MAP_CONTEXT, || (self.f)(decoded))
    }
}

/// Like [`Map`], for transforms that can fail.
///
/// An `Err(e)` from the transform becomes a failure reading
/// `error in map block: <e>`.
#[derive(Debug, Clone)]
pub struct TryMap<D, F> {
    decoder: D,
    f: F,
}

impl<D, F> TryMap<D, F> {
    /// Creates a decoder that applies the fallible `f` to the output of `decoder`.
    pub fn new(decoder: D, f: F) -> Self {
        Self { decoder, f }
    }
}

impl<D, F, U, E> Decoder for TryMap<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> Result<U, E> + Send + Sync,
    E: Display,
{
    type Output = U;

    fn decode(&self, value: &Value) -> DecodeResult<U> {
        let decoded = self.decoder.decode(value)?;
        guard(MAP_CONTEXT, || (self.f)(decoded))?.map_err(|e| {
            Failure::with_kind(FailureKind::Callback, format!("{}: {}", MAP_CONTEXT, e))
        })
    }
}

/// Tries decoders in declaration order and returns the first success.
///
/// Later decoders are not run once one succeeds. When none succeeds the
/// result is a single `None of the decoders matched` failure; the individual
/// failures are kept on it as [`Failure::alternatives`].
pub struct Any<T> {
    decoders: Vec<BoxDecoder<T>>,
}

impl<T> Any<T> {
    /// Creates an `Any` with a single alternative.
    pub fn new<D>(decoder: D) -> Self
    where
        D: Decoder<Output = T> + 'static,
    {
        Self {
            decoders: vec![Box::new(decoder)],
        }
    }

    /// Creates an `Any` from a list of alternatives.
    ///
    /// An empty list produces a decoder that always fails.
    pub fn from_decoders(decoders: Vec<BoxDecoder<T>>) -> Self {
        Self { decoders }
    }

    /// Adds an alternative, tried after the existing ones.
    pub fn or<D>(mut self, decoder: D) -> Self
    where
        D: Decoder<Output = T> + 'static,
    {
        self.decoders.push(Box::new(decoder));
        self
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Returns true if there are no alternatives.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<T> Decoder for Any<T> {
    type Output = T;

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        let mut failures = Vec::with_capacity(self.decoders.len());
        for decoder in &self.decoders {
            match decoder.decode(value) {
                Ok(decoded) => return Ok(decoded),
                Err(failure) => failures.push(failure),
            }
        }

        tracing::trace!(alternatives = failures.len(), "no decoder matched");
        Err(Failure::exhausted(failures))
    }
}

/// Decodes a value, then uses it to choose a decoder for the same input.
///
/// The continuation receives the decoded value and returns the next decoder,
/// which runs against the *original* input. When branches build different
/// decoder types, return [`BoxDecoder`]s.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let name = Decoders::and_then(Decoders::field("version", Decoders::integer()), |version| {
///     if version == 1 {
///         Decoders::field("name", Decoders::string())
///     } else {
///         Decoders::field("fullName", Decoders::string())
///     }
/// });
///
/// assert_eq!(
///     name.decode(&json!({ "version": 1, "name": "John" })),
///     Ok("John".to_string())
/// );
/// assert_eq!(
///     name.decode(&json!({ "version": 2, "fullName": "Paul" })),
///     Ok("Paul".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AndThen<D, F> {
    decoder: D,
    f: F,
}

impl<D, F> AndThen<D, F> {
    /// Creates a decoder that runs `decoder`, then the decoder returned by `f`.
    pub fn new(decoder: D, f: F) -> Self {
        Self { decoder, f }
    }
}

impl<D, F, N> Decoder for AndThen<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> N + Send + Sync,
    N: Decoder,
{
    type Output = N::Output;

    fn decode(&self, value: &Value) -> DecodeResult<N::Output> {
        let decoded = self.decoder.decode(value)?;
        let next = guard(AND_THEN_CONTEXT, || (self.f)(decoded))?;
        next.decode(value)
    }
}
