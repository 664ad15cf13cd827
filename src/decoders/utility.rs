//! Decoders that ignore or pass through their input.
//!
//! This module provides [`Pass`], [`Succeed`] and [`Fail`], plus [`FromFn`]
//! for turning a closure into a decoder.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::error::Failure;
use crate::result::{guard, DecodeResult};

use super::traits::Decoder;

const FROM_FN_CONTEXT: &str = "error in decoder function";

/// Yields a copy of the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pass;

impl Decoder for Pass {
    type Output = Value;

    fn decode(&self, value: &Value) -> DecodeResult<Value> {
        Ok(value.clone())
    }
}

/// Always succeeds with a fixed value, whatever the input.
///
/// Useful as a default branch of [`Any`](crate::Any) or as the result of an
/// [`and_then`](Decoder::and_then) continuation.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let level = Decoders::any(vec![
///     Decoders::field("level", Decoders::integer()).boxed(),
///     Decoders::succeed(1_i64).boxed(),
/// ]);
///
/// assert_eq!(level.decode(&json!({ "level": 3 })), Ok(3));
/// assert_eq!(level.decode(&json!({})), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub struct Succeed<T> {
    value: T,
}

impl<T> Succeed<T> {
    /// Creates a decoder that always yields `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Send + Sync> Decoder for Succeed<T> {
    type Output = T;

    fn decode(&self, _value: &Value) -> DecodeResult<T> {
        Ok(self.value.clone())
    }
}

/// Always fails with a fixed message, whatever the input.
///
/// The output type is free, so a `Fail` can stand in for any decoder.
pub struct Fail<T> {
    message: String,
    output: PhantomData<fn() -> T>,
}

impl<T> Fail<T> {
    /// Creates a decoder that always fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            output: PhantomData,
        }
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<T> Clone for Fail<T> {
    fn clone(&self) -> Self {
        Self::new(self.message.clone())
    }
}

impl<T> fmt::Debug for Fail<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fail").field("message", &self.message).finish()
    }
}

impl<T> Decoder for Fail<T> {
    type Output = T;

    fn decode(&self, _value: &Value) -> DecodeResult<T> {
        Err(Failure::new(self.message.as_str()))
    }
}

/// A decoder backed by a closure.
///
/// A panic inside the closure becomes an `error in decoder function` failure.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders, Failure};
/// use serde_json::json;
///
/// let even = Decoders::from_fn(|value| match value.as_i64() {
///     Some(n) if n % 2 == 0 => Ok(n),
///     _ => Err(Failure::new("expected an even number")),
/// });
///
/// assert_eq!(even.decode(&json!(4)), Ok(4));
/// assert!(even.decode(&json!(3)).is_err());
/// ```
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> FromFn<F> {
    /// Wraps `f` as a decoder.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F, T> Decoder for FromFn<F>
where
    F: Fn(&Value) -> DecodeResult<T> + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        guard(FROM_FN_CONTEXT, || (self.f)(value))?
    }
}
