//! The result algebra shared by all decoders.
//!
//! Decoding produces a [`DecodeResult`], the standard `Result` specialised to
//! [`Failure`]. `map`, `map_err`, `and_then` and `unwrap_or` come from the
//! standard library; this module adds the combinators decoders need on top:
//! pairwise combination, first-failure collection and a guard that turns a
//! panicking user callback into a failure.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Failure, FailureKind};

/// The outcome of running a decoder.
pub type DecodeResult<T> = Result<T, Failure>;

/// Extra combinators for [`DecodeResult`].
pub trait ResultExt<T> {
    /// Combines two results when both succeed.
    ///
    /// Returns the receiver's failure if it has one, otherwise `other`'s.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{DecodeResult, Failure, ResultExt};
    ///
    /// let sum = DecodeResult::Ok(2).combine(Ok(3), |a, b| a + b);
    /// assert_eq!(sum, Ok(5));
    ///
    /// let first: DecodeResult<i32> = Err(Failure::new("error 1"));
    /// let second: DecodeResult<i32> = Err(Failure::new("error 2"));
    /// assert_eq!(first.combine(second, |a, b| a + b), Err(Failure::new("error 1")));
    /// ```
    fn combine<U, V>(self, other: DecodeResult<U>, f: impl FnOnce(T, U) -> V) -> DecodeResult<V>;

    /// Like [`combine`](ResultExt::combine), but `other` is only evaluated
    /// when the receiver succeeded.
    fn combine_lazy<U, V>(
        self,
        other: impl FnOnce() -> DecodeResult<U>,
        f: impl FnOnce(T, U) -> V,
    ) -> DecodeResult<V>;

    /// Returns the failure of an `Err`, or `default` for an `Ok`.
    fn unwrap_err_or(self, default: Failure) -> Failure;
}

impl<T> ResultExt<T> for DecodeResult<T> {
    fn combine<U, V>(self, other: DecodeResult<U>, f: impl FnOnce(T, U) -> V) -> DecodeResult<V> {
        let left = self?;
        let right = other?;
        Ok(f(left, right))
    }

    fn combine_lazy<U, V>(
        self,
        other: impl FnOnce() -> DecodeResult<U>,
        f: impl FnOnce(T, U) -> V,
    ) -> DecodeResult<V> {
        let left = self?;
        let right = other()?;
        Ok(f(left, right))
    }

    fn unwrap_err_or(self, default: Failure) -> Failure {
        match self {
            Ok(_) => default,
            Err(failure) => failure,
        }
    }
}

/// Collapses a sequence of results into a single result.
///
/// Succeeds with every value, in order, when all results are `Ok`. Otherwise
/// returns the first `Err` in sequence order; the iterator is not consumed
/// past that point.
///
/// # Example
///
/// ```rust
/// use decoding::{all, DecodeResult, Failure};
///
/// assert_eq!(all(vec![Ok(1), Ok(2)]), Ok(vec![1, 2]));
/// assert_eq!(
///     all(vec![Ok(1), Err(Failure::new("error"))]),
///     Err(Failure::new("error"))
/// );
/// assert_eq!(all(Vec::<DecodeResult<i32>>::new()), Ok(vec![]));
/// ```
pub fn all<T, I>(results: I) -> DecodeResult<Vec<T>>
where
    I: IntoIterator<Item = DecodeResult<T>>,
{
    results.into_iter().collect()
}

/// Runs a caller-supplied callback, converting a panic into a
/// [`FailureKind::Callback`] failure whose message starts with `context`.
///
/// The process panic hook still runs before the panic is caught, so the
/// default hook prints the panic to stderr. Callers that expect callback
/// panics install their own hook; see the crate docs.
pub(crate) fn guard<T>(context: &str, f: impl FnOnce() -> T) -> DecodeResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        tracing::warn!(context, reason = %reason, "decoder callback panicked");
        Failure::with_kind(FailureKind::Callback, format!("{}: {}", context, reason))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "callback panicked".to_string()
    }
}
