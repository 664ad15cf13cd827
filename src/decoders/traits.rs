//! The decoder trait.
//!
//! This module provides the [`Decoder`] trait every primitive and compound
//! decoder implements, the boxed form used where decoder shapes differ at
//! runtime, and the implementations that let tuples and vectors of decoders
//! run side by side against one input.

use std::sync::Arc;

use serde_json::Value;

use crate::result::{all, DecodeResult};

use super::combinators::{AndThen, Any, Map, TryMap};
use super::matching::Match;

/// A decoder behind a box, for when the concrete decoder type is only known
/// at runtime (e.g. the branches of [`and_then`](Decoder::and_then)).
pub type BoxDecoder<T> = Box<dyn Decoder<Output = T>>;

/// A composable unit that turns an untyped value into a typed one.
///
/// A decoder is immutable: building one runs nothing, and decoding never
/// changes it, so one decoder can serve any number of inputs. The `Send + Sync`
/// bounds let decoders be shared across threads and stored as
/// [`BoxDecoder`] trait objects.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let decoder = Decoders::field("id", Decoders::integer()).map(|id| id * 2);
/// assert_eq!(decoder.decode(&json!({ "id": 21 })), Ok(42));
/// ```
pub trait Decoder: Send + Sync {
    /// The type produced by a successful decode.
    type Output;

    /// Decodes `value`, producing the typed output or a [`Failure`](crate::Failure).
    fn decode(&self, value: &Value) -> DecodeResult<Self::Output>;

    /// Erases the concrete type of this decoder.
    fn boxed(self) -> BoxDecoder<Self::Output>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    /// Applies `f` to the decoded value.
    ///
    /// A panic in `f` becomes an `error in map block` failure.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Applies a fallible `f` to the decoded value. An `Err` returned by `f`
    /// becomes an `error in map block` failure.
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, E> + Send + Sync,
        E: std::fmt::Display,
    {
        TryMap::new(self, f)
    }

    /// Uses the decoded value to choose the next decoder, which then runs
    /// against the original input.
    fn and_then<D, F>(self, f: F) -> AndThen<Self, F>
    where
        Self: Sized,
        D: Decoder,
        F: Fn(Self::Output) -> D + Send + Sync,
    {
        AndThen::new(self, f)
    }

    /// Tries this decoder first and `other` if it fails.
    fn or<D>(self, other: D) -> Any<Self::Output>
    where
        Self: Sized + 'static,
        D: Decoder<Output = Self::Output> + 'static,
    {
        Any::new(self).or(other)
    }

    /// Accepts `null` in addition to whatever this decoder accepts.
    fn optional(self) -> Any<Option<Self::Output>>
    where
        Self: Sized + 'static,
        Self::Output: 'static,
    {
        Any::new(self.map(Some)).or(Match::nil().map(|()| None::<Self::Output>))
    }
}

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        (**self).decode(value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        (**self).decode(value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        (**self).decode(value)
    }
}

/// Runs every decoder against the same input; the first failure wins.
impl<D: Decoder> Decoder for Vec<D> {
    type Output = Vec<D::Output>;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        all(self.iter().map(|decoder| decoder.decode(value)))
    }
}

// Tuples of decoders run each element against the same input, left to right,
// and stop at the first failure.
macro_rules! tuple_decoder {
    ($($name:ident),+) => {
        impl<$($name: Decoder),+> Decoder for ($($name,)+) {
            type Output = ($($name::Output,)+);

            #[allow(non_snake_case)]
            fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
                let ($($name,)+) = self;
                Ok(($($name.decode(value)?,)+))
            }
        }
    };
}

tuple_decoder!(A);
tuple_decoder!(A, B);
tuple_decoder!(A, B, C);
tuple_decoder!(A, B, C, D);
tuple_decoder!(A, B, C, D, E);
tuple_decoder!(A, B, C, D, E, F);
tuple_decoder!(A, B, C, D, E, F, G);
tuple_decoder!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::Decoders;
    use crate::error::Failure;
    use serde_json::json;

    #[test]
    fn test_box_and_arc_delegate() {
        let boxed: BoxDecoder<String> = Decoders::string().boxed();
        assert_eq!(boxed.decode(&json!("a")), Ok("a".to_string()));

        let shared = Arc::new(Decoders::integer());
        assert_eq!(shared.decode(&json!(3)), Ok(3));
        assert_eq!((&shared).decode(&json!(4)), Ok(4));
    }

    #[test]
    fn test_tuple_runs_against_same_input() {
        let decoder = (
            Decoders::field("id", Decoders::integer()),
            Decoders::field("name", Decoders::string()),
        );
        let result = decoder.decode(&json!({ "id": 1, "name": "Ringo" }));
        assert_eq!(result, Ok((1, "Ringo".to_string())));
    }

    #[test]
    fn test_tuple_first_failure_wins() {
        let decoder = (
            Decoders::field("id", Decoders::string()),
            Decoders::field("name", Decoders::integer()),
        );
        let result = decoder.decode(&json!({ "id": 1, "name": "Ringo" }));
        assert_eq!(
            result,
            Err(Failure::new("expected String, got Integer").push("id"))
        );
    }

    #[test]
    fn test_vec_of_decoders() {
        let decoder = vec![
            Decoders::field("a", Decoders::integer()),
            Decoders::field("b", Decoders::integer()),
        ];
        assert_eq!(decoder.decode(&json!({ "a": 1, "b": 2 })), Ok(vec![1, 2]));
        assert!(decoder.decode(&json!({ "a": 1 })).is_err());
    }

    #[test]
    fn test_optional_method() {
        let decoder = Decoders::string().optional();
        assert_eq!(decoder.decode(&json!("foo")), Ok(Some("foo".to_string())));
        assert_eq!(decoder.decode(&json!(null)), Ok(None));
        assert!(decoder.decode(&json!(1)).is_err());
    }

    #[test]
    fn test_or_method() {
        let decoder = Decoders::string().or(Decoders::integer().map(|i| i.to_string()));
        assert_eq!(decoder.decode(&json!(12)), Ok("12".to_string()));
        assert_eq!(decoder.decode(&json!("12")), Ok("12".to_string()));
    }
}
