//! Leaf decoders that match a value against a type or a pattern.
//!
//! This module provides [`Match`], the primitive behind `string`, `integer`,
//! `float`, `numeric`, `nil`, `true_`, `false_` and `regexp`.

use std::fmt;

use regex::Regex;
use serde_json::{Number, Value};

use crate::error::{BuildError, Failure, FailureKind};
use crate::result::DecodeResult;
use crate::value::ValueKind;

use super::traits::Decoder;

/// What a [`Match`] decoder checks the input against.
#[derive(Debug, Clone)]
enum Pattern {
    Kind(ValueKind),
    Regex(Regex),
}

/// A decoder that succeeds when the input matches a type tag or a regular
/// expression, yielding the input converted to `T`.
///
/// Each type tag is paired with an extraction function, so a matching input
/// is handed back typed (`String`, `i64`, ...) rather than as a raw `Value`.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let integer = Decoders::integer();
/// assert_eq!(integer.decode(&json!(123)), Ok(123));
///
/// let failure = integer.decode(&json!(0.5)).unwrap_err();
/// assert_eq!(failure.to_string(), "expected Integer, got Float");
/// ```
#[derive(Clone)]
pub struct Match<T> {
    pattern: Pattern,
    extract: fn(&Value) -> Option<T>,
}

impl<T> Match<T> {
    /// Creates a decoder for values of `kind`, converted with `extract`.
    ///
    /// `extract` returning `None` is reported as a type mismatch.
    pub fn kind(kind: ValueKind, extract: fn(&Value) -> Option<T>) -> Self {
        Self {
            pattern: Pattern::Kind(kind),
            extract,
        }
    }

    fn mismatch(&self, value: &Value) -> Failure {
        match &self.pattern {
            Pattern::Kind(expected) => {
                let actual = ValueKind::of(value);
                if expected.matches(value) {
                    // right kind, but not representable as T (e.g. u64 above i64::MAX)
                    Failure::with_kind(
                        FailureKind::TypeMismatch,
                        format!("expected {} within range, got: {}", expected, value),
                    )
                } else {
                    Failure::type_mismatch(*expected, actual)
                }
            }
            Pattern::Regex(regex) => Failure::with_kind(
                FailureKind::PatternMismatch,
                format!("expected value matching /{}/, got: {}", regex.as_str(), value),
            ),
        }
    }
}

impl Match<String> {
    /// Creates a decoder for strings.
    pub fn string() -> Self {
        Self::kind(ValueKind::String, |v| v.as_str().map(str::to_string))
    }

    /// Creates a decoder for strings matching a precompiled regular expression.
    pub fn regex(regex: Regex) -> Self {
        Self {
            pattern: Pattern::Regex(regex),
            extract: |v| v.as_str().map(str::to_string),
        }
    }

    /// Compiles `pattern` and creates a decoder for strings matching it.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidPattern` if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, BuildError> {
        let regex = Regex::new(pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::regex(regex))
    }
}

impl Match<i64> {
    /// Creates a decoder for integers. Floats are rejected, even whole ones.
    pub fn integer() -> Self {
        Self::kind(ValueKind::Integer, Value::as_i64)
    }
}

impl Match<f64> {
    /// Creates a decoder for floats. Integers are rejected.
    pub fn float() -> Self {
        Self::kind(ValueKind::Float, |v| if v.is_f64() { v.as_f64() } else { None })
    }
}

impl Match<Number> {
    /// Creates a decoder for any number, integer or float.
    pub fn numeric() -> Self {
        Self::kind(ValueKind::Numeric, |v| match v {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        })
    }
}

impl Match<()> {
    /// Creates a decoder for `null`.
    pub fn nil() -> Self {
        Self::kind(ValueKind::Null, Value::as_null)
    }
}

impl Match<bool> {
    /// Creates a decoder for the literal `true`.
    pub fn true_() -> Self {
        Self::kind(ValueKind::True, |v| (v.as_bool() == Some(true)).then_some(true))
    }

    /// Creates a decoder for the literal `false`.
    pub fn false_() -> Self {
        Self::kind(ValueKind::False, |v| (v.as_bool() == Some(false)).then_some(false))
    }
}

impl<T> fmt::Debug for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match").field("pattern", &self.pattern).finish()
    }
}

impl<T> Decoder for Match<T> {
    type Output = T;

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        let matched = match &self.pattern {
            Pattern::Kind(_) => (self.extract)(value),
            Pattern::Regex(regex) => match value.as_str() {
                Some(s) if regex.is_match(s) => (self.extract)(value),
                _ => None,
            },
        };
        matched.ok_or_else(|| self.mismatch(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message<T: std::fmt::Debug>(result: DecodeResult<T>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_string() {
        let decoder = Match::string();
        assert_eq!(decoder.decode(&json!("foo")), Ok("foo".to_string()));
        assert_eq!(message(decoder.decode(&json!(123))), "expected String, got Integer");
    }

    #[test]
    fn test_integer() {
        let decoder = Match::integer();
        assert_eq!(decoder.decode(&json!(123)), Ok(123));
        assert_eq!(decoder.decode(&json!(-7)), Ok(-7));
        assert_eq!(message(decoder.decode(&json!(0.5))), "expected Integer, got Float");
        assert_eq!(message(decoder.decode(&json!(null))), "expected Integer, got Null");
    }

    #[test]
    fn test_integer_out_of_range() {
        let failure = Match::integer().decode(&json!(u64::MAX)).unwrap_err();
        assert_eq!(
            failure.message(),
            "expected Integer within range, got: 18446744073709551615"
        );
        assert_eq!(failure.kind(), FailureKind::TypeMismatch);
    }

    #[test]
    fn test_float() {
        let decoder = Match::float();
        assert_eq!(decoder.decode(&json!(123.0)), Ok(123.0));
        assert_eq!(message(decoder.decode(&json!(123))), "expected Float, got Integer");
    }

    #[test]
    fn test_numeric() {
        let decoder = Match::numeric();
        assert_eq!(decoder.decode(&json!(123)), Ok(Number::from(123)));
        assert_eq!(decoder.decode(&json!(1.5)).map(|n| n.as_f64()), Ok(Some(1.5)));
        assert_eq!(message(decoder.decode(&json!(null))), "expected Numeric, got Null");
    }

    #[test]
    fn test_nil() {
        let decoder = Match::nil();
        assert_eq!(decoder.decode(&json!(null)), Ok(()));
        assert_eq!(message(decoder.decode(&json!(123))), "expected Null, got Integer");
    }

    #[test]
    fn test_true_and_false() {
        assert_eq!(Match::true_().decode(&json!(true)), Ok(true));
        assert_eq!(
            message(Match::true_().decode(&json!(false))),
            "expected True, got False"
        );
        assert_eq!(Match::false_().decode(&json!(false)), Ok(false));
        assert_eq!(
            message(Match::false_().decode(&json!(true))),
            "expected False, got True"
        );
    }

    #[test]
    fn test_regex_match() {
        let decoder = Match::pattern(r"^\d+$").unwrap();
        assert_eq!(decoder.decode(&json!("12345")), Ok("12345".to_string()));

        let failure = decoder.decode(&json!("abc")).unwrap_err();
        assert_eq!(failure.message(), r#"expected value matching /^\d+$/, got: "abc""#);
        assert_eq!(failure.kind(), FailureKind::PatternMismatch);
    }

    #[test]
    fn test_regex_rejects_non_strings() {
        let decoder = Match::pattern("1").unwrap();
        assert_eq!(
            message(decoder.decode(&json!(1))),
            "expected value matching /1/, got: 1"
        );
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Match::pattern("("),
            Err(BuildError::InvalidPattern { .. })
        ));
    }
}
