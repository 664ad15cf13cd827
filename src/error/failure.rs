//! The decode failure type.
//!
//! A [`Failure`] is a message plus the stack of container keys and offsets
//! that were crossed on the way out of the decoder tree. Nested decoders push
//! their segment as the failure propagates, so the innermost segment is pushed
//! first and rendering reverses the stack.

use std::fmt::{self, Display};

use stillwater::NonEmptyVec;

use crate::path::{DecodePath, PathSegment};
use crate::value::ValueKind;

/// Classification of a decode failure.
///
/// Every built-in decoder tags its failures with one of these kinds so callers
/// can branch on the cause without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The value has a different type than expected.
    TypeMismatch,
    /// A string did not match the expected regular expression.
    PatternMismatch,
    /// Expected an object or an array and got something else.
    Structure,
    /// An object lacks a required key.
    MissingKey,
    /// An array has no element at the requested offset.
    OutOfBounds,
    /// None of the alternatives of an `any` decoder matched.
    Exhausted,
    /// A caller-supplied transform or continuation failed.
    Callback,
    /// A failure produced by `fail` or by hand-written decoders.
    Custom,
}

impl FailureKind {
    /// Returns the machine-readable code for this kind (e.g. `missing_key`).
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::TypeMismatch => "type_mismatch",
            FailureKind::PatternMismatch => "pattern_mismatch",
            FailureKind::Structure => "invalid_structure",
            FailureKind::MissingKey => "missing_key",
            FailureKind::OutOfBounds => "out_of_bounds",
            FailureKind::Exhausted => "none_matched",
            FailureKind::Callback => "callback_error",
            FailureKind::Custom => "custom",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A decode failure: a message and the path at which it occurred.
///
/// Failures are values. [`push`](Failure::push) returns a new failure with one
/// more path segment; nothing is mutated behind a shared reference.
///
/// Two failures are equal when their messages and paths are equal. The kind
/// and the alternatives of an exhaustion failure are diagnostic details and do
/// not take part in equality.
///
/// # Example
///
/// ```rust
/// use decoding::Failure;
///
/// let failure = Failure::new("expected string").push("0").push("foo");
/// assert_eq!(failure.to_string(), "Error at .foo.0: expected string");
/// ```
#[derive(Debug, Clone)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    // innermost first
    segments: Vec<PathSegment>,
    alternatives: Option<Box<NonEmptyVec<Failure>>>,
}

impl Failure {
    /// Creates a failure with the given message and kind [`FailureKind::Custom`].
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(FailureKind::Custom, message)
    }

    /// Creates a failure with an explicit kind.
    pub fn with_kind(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            segments: Vec::new(),
            alternatives: None,
        }
    }

    /// Creates a type mismatch failure, e.g. `expected Integer, got String`.
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::with_kind(
            FailureKind::TypeMismatch,
            format!("expected {}, got {}", expected, actual),
        )
    }

    /// Creates the failure reported when no alternative of an `any` decoder
    /// matched, keeping the individual failures for inspection.
    pub fn exhausted(alternatives: Vec<Failure>) -> Self {
        Self {
            kind: FailureKind::Exhausted,
            message: "None of the decoders matched".to_string(),
            segments: Vec::new(),
            alternatives: NonEmptyVec::from_vec(alternatives).map(Box::new),
        }
    }

    /// Returns a new failure with `segment` added as the outermost path segment.
    pub fn push(mut self, segment: impl Into<PathSegment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Returns a new failure whose message is `prefix` followed by this
    /// failure's message. The path is kept.
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.message = format!("{}{}", prefix, self.message);
        self
    }

    /// Returns the kind of this failure.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the base message, without the path.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the path, ordered from the outermost container inward.
    pub fn path(&self) -> DecodePath {
        DecodePath::from_segments(self.segments.iter().rev().cloned().collect())
    }

    /// Returns the failures of the alternatives tried by an `any` decoder, in
    /// declaration order. Empty for every other kind of failure.
    pub fn alternatives(&self) -> Vec<&Failure> {
        self.alternatives
            .as_ref()
            .map(|alts| alts.iter().collect())
            .unwrap_or_default()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.segments == other.segments
    }
}

impl Eq for Failure {}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "Error at {}: {}", self.path(), self.message)
        }
    }
}

impl std::error::Error for Failure {}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::new(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::new(message)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Failure>();
    assert_sync::<Failure>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_with_same_message_are_equal() {
        assert_eq!(Failure::new("foo"), Failure::new("foo"));
        assert_ne!(Failure::new("foo"), Failure::new("bar"));
    }

    #[test]
    fn test_equality_includes_path() {
        assert_ne!(Failure::new("foo").push("a"), Failure::new("foo"));
        assert_eq!(Failure::new("foo").push("a"), Failure::new("foo").push("a"));
    }

    #[test]
    fn test_equality_ignores_kind() {
        assert_eq!(
            Failure::with_kind(FailureKind::MissingKey, "foo"),
            Failure::new("foo")
        );
    }

    #[test]
    fn test_bare_message_without_path() {
        let failure = Failure::new("expected string");
        assert_eq!(failure.to_string(), "expected string");
    }

    #[test]
    fn test_path_prefix_is_reversed() {
        let failure = Failure::new("expected string").push("0").push("foo");
        assert_eq!(failure.to_string(), "Error at .foo.0: expected string");
        assert_eq!(failure.path().to_string(), ".foo.0");
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let base = Failure::new("oops");
        let pushed = base.clone().push(1usize);
        assert!(base.path().is_root());
        assert_eq!(pushed.path().len(), 1);
    }

    #[test]
    fn test_type_mismatch_message() {
        let failure = Failure::type_mismatch(ValueKind::Integer, ValueKind::String);
        assert_eq!(failure.message(), "expected Integer, got String");
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
    }

    #[test]
    fn test_exhausted_keeps_alternatives() {
        let failure = Failure::exhausted(vec![Failure::new("a"), Failure::new("b")]);
        assert_eq!(failure.to_string(), "None of the decoders matched");
        assert_eq!(failure.kind().code(), "none_matched");
        let messages: Vec<_> = failure.alternatives().iter().map(|f| f.message()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }

    #[test]
    fn test_exhausted_failures_nest() {
        let inner = Failure::exhausted(vec![Failure::new("a").push("x"), Failure::new("b")]);
        let outer = Failure::exhausted(vec![inner.clone().push("y"), Failure::new("c")]);
        let cloned = outer.clone();

        let first = cloned.alternatives()[0];
        assert_eq!(first.to_string(), "Error at .y: None of the decoders matched");
        let nested: Vec<_> = first.alternatives().iter().map(|f| f.to_string()).collect();
        assert_eq!(nested, vec!["Error at .x: a", "b"]);
        assert!(std::mem::size_of::<Failure>() <= 128);
    }

    #[test]
    fn test_exhausted_without_alternatives() {
        let failure = Failure::exhausted(Vec::new());
        assert!(failure.alternatives().is_empty());
    }

    #[test]
    fn test_prefixed_keeps_path() {
        let failure = Failure::new("expected Integer, got String")
            .push("a")
            .prefixed("invalid key: ");
        assert_eq!(
            failure.to_string(),
            "Error at .a: invalid key: expected Integer, got String"
        );
    }
}
