//! Decoders for JSON arrays.
//!
//! This module provides [`Array`] for decoding every element of an array and
//! [`Index`] for decoding a single element by position.

use serde_json::Value;

use crate::error::{Failure, FailureKind};
use crate::path::PathSegment;
use crate::result::{all, DecodeResult};
use crate::value::ValueKind;

use super::traits::Decoder;

fn not_an_array(value: &Value) -> Failure {
    Failure::with_kind(
        FailureKind::Structure,
        format!("expected an Array, got: {}", ValueKind::of(value)),
    )
}

/// Decodes every element of an array with the same decoder.
///
/// Elements are decoded in order and decoding stops at the first failing
/// element, whose index is pushed onto the failure's path.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let numbers = Decoders::array(Decoders::integer());
/// assert_eq!(numbers.decode(&json!([1, 2, 3])), Ok(vec![1, 2, 3]));
///
/// let failure = numbers.decode(&json!([1, "2"])).unwrap_err();
/// assert_eq!(failure.to_string(), "Error at .1: expected Integer, got String");
/// ```
#[derive(Debug, Clone)]
pub struct Array<D> {
    decoder: D,
}

impl<D> Array<D> {
    /// Creates a decoder applying `decoder` to each element.
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }
}

impl<D: Decoder> Decoder for Array<D> {
    type Output = Vec<D::Output>;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        let items = value.as_array().ok_or_else(|| not_an_array(value))?;

        all(items.iter().enumerate().map(|(i, item)| {
            self.decoder
                .decode(item)
                .map_err(|failure| failure.push(i))
        }))
    }
}

/// Decodes the element at one position of an array.
///
/// Negative offsets count from the end, so `-1` is the last element.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let last = Decoders::index(-1, Decoders::integer());
/// assert_eq!(last.decode(&json!([1, 2, 3])), Ok(3));
///
/// let failure = Decoders::index(5, Decoders::integer())
///     .decode(&json!([1, 2, 3]))
///     .unwrap_err();
/// assert_eq!(
///     failure.to_string(),
///     "error decoding array: index 5 outside of array bounds: -3...3"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Index<D> {
    offset: isize,
    decoder: D,
}

impl<D> Index<D> {
    /// Creates a decoder for the element at `offset`.
    pub fn new(offset: isize, decoder: D) -> Self {
        Self { offset, decoder }
    }

    /// Returns the offset this decoder reads.
    pub fn offset(&self) -> isize {
        self.offset
    }

    fn resolve(&self, len: usize) -> Option<usize> {
        if self.offset >= 0 {
            let position = self.offset.unsigned_abs();
            (position < len).then_some(position)
        } else {
            len.checked_sub(self.offset.unsigned_abs())
        }
    }
}

impl<D: Decoder> Decoder for Index<D> {
    type Output = D::Output;

    fn decode(&self, value: &Value) -> DecodeResult<D::Output> {
        let items = value.as_array().ok_or_else(|| not_an_array(value))?;

        let position = self.resolve(items.len()).ok_or_else(|| {
            Failure::with_kind(
                FailureKind::OutOfBounds,
                format!(
                    "error decoding array: index {} outside of array bounds: -{}...{}",
                    self.offset,
                    items.len(),
                    items.len()
                ),
            )
        })?;

        self.decoder
            .decode(&items[position])
            .map_err(|failure| failure.push(PathSegment::index(self.offset)))
    }
}
