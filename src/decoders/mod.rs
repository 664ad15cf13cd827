//! Decoder definitions.
//!
//! This module provides the [`Decoder`] trait and every primitive and compound
//! decoder. Decoders are plain values: building one runs nothing, and a
//! decoder only looks at input when [`decode`](Decoder::decode) is called.
//! Failures short-circuit; the first failing sub-decoder determines the
//! result, with its location recorded on the failure's path.
//!
//! # Example
//!
//! ```rust
//! use decoding::{decode, Decoder, Decoders};
//! use serde_json::json;
//!
//! let tags = Decoders::field("tags", Decoders::array(Decoders::string()));
//!
//! let result = decode(&tags, &json!({ "tags": ["a", "b"] }));
//! assert_eq!(result, Ok(vec!["a".to_string(), "b".to_string()]));
//! ```

mod array;
mod combinators;
mod matching;
mod object;
mod traits;
mod utility;

pub use array::{Array, Index};
pub use combinators::{AndThen, Any, Map, TryMap};
pub use matching::Match;
pub use object::{At, Field, Hash, Record};
pub use traits::{BoxDecoder, Decoder};
pub use utility::{Fail, FromFn, Pass, Succeed};

use regex::Regex;
use serde_json::{Number, Value};

use crate::error::BuildError;
use crate::result::DecodeResult;
use crate::value::Symbol;

/// Entry point for creating decoders.
///
/// `Decoders` provides one constructor per decoder. Compound constructors take
/// their sub-decoders by value, so a whole decoder is built as a single
/// expression.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     id: i64,
///     name: String,
///     nickname: Option<String>,
/// }
///
/// let user = Decoders::map(
///     (
///         Decoders::field("id", Decoders::integer()),
///         Decoders::field("name", Decoders::string()),
///         Decoders::field("nickname", Decoders::optional(Decoders::string())),
///     ),
///     |(id, name, nickname)| User { id, name, nickname },
/// );
///
/// let decoded = user.decode(&json!({ "id": 1, "name": "John", "nickname": null }));
/// assert_eq!(
///     decoded,
///     Ok(User { id: 1, name: "John".to_string(), nickname: None })
/// );
/// ```
pub struct Decoders;

impl Decoders {
    /// Creates a decoder for strings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// assert_eq!(Decoders::string().decode(&json!("foo")), Ok("foo".to_string()));
    /// assert!(Decoders::string().decode(&json!(1)).is_err());
    /// ```
    pub fn string() -> Match<String> {
        Match::string()
    }

    /// Creates a decoder for integers that fit in an `i64`.
    ///
    /// Floats are rejected, including whole ones like `1.0`.
    pub fn integer() -> Match<i64> {
        Match::integer()
    }

    /// Creates a decoder for floats. Integers are rejected.
    pub fn float() -> Match<f64> {
        Match::float()
    }

    /// Creates a decoder for any number, integer or float.
    pub fn numeric() -> Match<Number> {
        Match::numeric()
    }

    /// Creates a decoder for `null`.
    pub fn nil() -> Match<()> {
        Match::nil()
    }

    /// Creates a decoder for the literal `true`.
    pub fn true_() -> Match<bool> {
        Match::true_()
    }

    /// Creates a decoder for the literal `false`.
    pub fn false_() -> Match<bool> {
        Match::false_()
    }

    /// Creates a decoder for either boolean.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// assert_eq!(Decoders::boolean().decode(&json!(false)), Ok(false));
    /// assert!(Decoders::boolean().decode(&json!("true")).is_err());
    /// ```
    pub fn boolean() -> Any<bool> {
        Any::new(Match::true_()).or(Match::false_())
    }

    /// Creates a decoder for strings, interned as [`Symbol`]s.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders, Symbol};
    /// use serde_json::json;
    ///
    /// let status = Decoders::symbol().decode(&json!("shipped")).unwrap();
    /// assert_eq!(status, Symbol::intern("shipped"));
    /// ```
    pub fn symbol() -> Map<Match<String>, fn(String) -> Symbol> {
        let intern: fn(String) -> Symbol = |text| Symbol::intern(text);
        Map::new(Match::string(), intern)
    }

    /// Compiles `pattern` and creates a decoder for strings matching it.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidPattern` if the pattern does not compile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// let zip = Decoders::regexp(r"^\d{5}$").unwrap();
    /// assert_eq!(zip.decode(&json!("12345")), Ok("12345".to_string()));
    ///
    /// let failure = zip.decode(&json!("1234")).unwrap_err();
    /// assert_eq!(
    ///     failure.to_string(),
    ///     r#"expected value matching /^\d{5}$/, got: "1234""#
    /// );
    ///
    /// assert!(Decoders::regexp("(").is_err());
    /// ```
    pub fn regexp(pattern: &str) -> Result<Match<String>, BuildError> {
        Match::pattern(pattern)
    }

    /// Creates a decoder for strings matching an already compiled regex.
    pub fn regex(regex: Regex) -> Match<String> {
        Match::regex(regex)
    }

    /// Applies `f` to the output of `decoder`.
    ///
    /// Pass a tuple of decoders to combine several values; `f` then receives a
    /// tuple of their outputs. A panic in `f` becomes an
    /// `error in map block: <reason>` failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// let double = Decoders::map(Decoders::integer(), |i| i * 2);
    /// assert_eq!(double.decode(&json!(21)), Ok(42));
    ///
    /// let broken = Decoders::map(Decoders::integer(), |_| -> i64 { panic!("boom") });
    /// let failure = broken.decode(&json!(1)).unwrap_err();
    /// assert_eq!(failure.to_string(), "error in map block: boom");
    /// ```
    pub fn map<D, F, U>(decoder: D, f: F) -> Map<D, F>
    where
        D: Decoder,
        F: Fn(D::Output) -> U + Send + Sync,
    {
        Map::new(decoder, f)
    }

    /// Applies a fallible `f` to the output of `decoder`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// let port = Decoders::try_map(Decoders::string(), |s| s.parse::<u16>());
    /// assert_eq!(port.decode(&json!("8080")), Ok(8080));
    /// assert!(port.decode(&json!("http")).is_err());
    /// ```
    pub fn try_map<D, F, U, E>(decoder: D, f: F) -> TryMap<D, F>
    where
        D: Decoder,
        F: Fn(D::Output) -> Result<U, E> + Send + Sync,
        E: std::fmt::Display,
    {
        TryMap::new(decoder, f)
    }

    /// Tries each decoder in order and yields the first success.
    ///
    /// Alternatives are type-erased with [`Decoder::boxed`] so that decoders
    /// of different shapes can share one list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// let id = Decoders::any(vec![
    ///     Decoders::string().boxed(),
    ///     Decoders::integer().map(|i| i.to_string()).boxed(),
    /// ]);
    ///
    /// assert_eq!(id.decode(&json!(7)), Ok("7".to_string()));
    ///
    /// let failure = id.decode(&json!(null)).unwrap_err();
    /// assert_eq!(failure.to_string(), "None of the decoders matched");
    /// assert_eq!(failure.alternatives().len(), 2);
    /// ```
    pub fn any<T>(decoders: Vec<BoxDecoder<T>>) -> Any<T> {
        Any::from_decoders(decoders)
    }

    /// Accepts `null` (yielding `None`) in addition to what `decoder` accepts.
    ///
    /// A missing key is still a failure; wrap the [`field`](Decoders::field)
    /// in `optional` only to tolerate an explicit `null`.
    pub fn optional<D>(decoder: D) -> Any<Option<D::Output>>
    where
        D: Decoder + 'static,
        D::Output: 'static,
    {
        decoder.optional()
    }

    /// Decodes the value under `key` of an object.
    pub fn field<D: Decoder>(key: impl ToString, decoder: D) -> Field<D> {
        Field::new(key, decoder)
    }

    /// Decodes a value nested under a chain of keys, outermost first.
    pub fn at<T, K, D>(keys: impl IntoIterator<Item = K>, decoder: D) -> At<T>
    where
        T: 'static,
        K: ToString,
        D: Decoder<Output = T> + 'static,
    {
        At::new(keys, decoder)
    }

    /// Decodes every element of an array.
    pub fn array<D: Decoder>(decoder: D) -> Array<D> {
        Array::new(decoder)
    }

    /// Decodes the element at `offset` of an array. Negative offsets count
    /// from the end.
    pub fn index<D: Decoder>(offset: isize, decoder: D) -> Index<D> {
        Index::new(offset, decoder)
    }

    /// Decodes an object with arbitrary keys into an ordered map.
    pub fn hash<K, V>(key_decoder: K, value_decoder: V) -> Hash<K, V>
    where
        K: Decoder,
        V: Decoder,
    {
        Hash::new(key_decoder, value_decoder)
    }

    /// Decodes a value, then runs the decoder returned by `f` against the same
    /// input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use decoding::{Decoder, Decoders};
    /// use serde_json::json;
    ///
    /// let shape = Decoders::and_then(Decoders::field("type", Decoders::string()), |kind| {
    ///     match kind.as_str() {
    ///         "circle" => Decoders::field("radius", Decoders::float()).boxed(),
    ///         "square" => Decoders::field("side", Decoders::float()).boxed(),
    ///         other => Decoders::fail(format!("unknown shape {}", other)).boxed(),
    ///     }
    /// });
    ///
    /// assert_eq!(shape.decode(&json!({ "type": "circle", "radius": 1.5 })), Ok(1.5));
    /// assert_eq!(
    ///     shape.decode(&json!({ "type": "hexagon" })).unwrap_err().to_string(),
    ///     "unknown shape hexagon"
    /// );
    /// ```
    pub fn and_then<D, F, N>(decoder: D, f: F) -> AndThen<D, F>
    where
        D: Decoder,
        F: Fn(D::Output) -> N + Send + Sync,
        N: Decoder,
    {
        AndThen::new(decoder, f)
    }

    /// Creates an empty [`Record`]; add entries with [`Record::entry`].
    pub fn record() -> Record {
        Record::new()
    }

    /// Creates a decoder that always yields `value`.
    pub fn succeed<T: Clone + Send + Sync>(value: T) -> Succeed<T> {
        Succeed::new(value)
    }

    /// Creates a decoder that always fails with `message`.
    pub fn fail<T>(message: impl Into<String>) -> Fail<T> {
        Fail::new(message)
    }

    /// Creates a decoder that yields its input unchanged.
    pub fn original() -> Pass {
        Pass
    }

    /// Wraps a closure as a decoder.
    pub fn from_fn<F, T>(f: F) -> FromFn<F>
    where
        F: Fn(&Value) -> DecodeResult<T> + Send + Sync,
    {
        FromFn::new(f)
    }
}
