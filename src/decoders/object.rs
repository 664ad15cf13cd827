//! Decoders for JSON objects.
//!
//! This module provides [`Field`] and [`At`] for reading keyed values,
//! [`Hash`] for objects with arbitrary keys, and [`Record`] for assembling
//! several decoded values into one keyed map.

use std::hash::Hash as StdHash;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Failure, FailureKind};
use crate::path::PathSegment;
use crate::result::DecodeResult;
use crate::value::ValueKind;

use super::traits::{BoxDecoder, Decoder};

fn not_an_object(value: &Value) -> Failure {
    Failure::with_kind(
        FailureKind::Structure,
        format!("expected an Object, got: {}", ValueKind::of(value)),
    )
}

/// Decodes the value stored under a key of an object.
///
/// Fails when the input is not an object or lacks the key. When the inner
/// decoder fails, the key is pushed onto the failure's path.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let id = Decoders::field("id", Decoders::integer());
/// assert_eq!(id.decode(&json!({ "id": 5 })), Ok(5));
///
/// let failure = id.decode(&json!({ "id": "5" })).unwrap_err();
/// assert_eq!(failure.to_string(), "Error at .id: expected Integer, got String");
/// ```
#[derive(Debug, Clone)]
pub struct Field<D> {
    key: String,
    decoder: D,
}

impl<D> Field<D> {
    /// Creates a decoder for `key`. Non-string keys are converted with
    /// `to_string`.
    pub fn new(key: impl ToString, decoder: D) -> Self {
        Self {
            key: key.to_string(),
            decoder,
        }
    }

    /// Returns the key this decoder reads.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<D: Decoder> Decoder for Field<D> {
    type Output = D::Output;

    fn decode(&self, value: &Value) -> DecodeResult<D::Output> {
        let object = value.as_object().ok_or_else(|| not_an_object(value))?;

        let field_value = object.get(&self.key).ok_or_else(|| {
            Failure::with_kind(
                FailureKind::MissingKey,
                format!("expected an Object with key {}", self.key),
            )
        })?;

        self.decoder
            .decode(field_value)
            .map_err(|failure| failure.push(PathSegment::key(self.key.as_str())))
    }
}

/// Decodes a value nested several objects deep.
///
/// `At::new(["a", "b", "c"], d)` behaves exactly like
/// `Field::new("a", Field::new("b", Field::new("c", d)))`.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let decoder = Decoders::at(["a", "b", "c"], Decoders::string());
/// assert_eq!(
///     decoder.decode(&json!({ "a": { "b": { "c": "d" } } })),
///     Ok("d".to_string())
/// );
///
/// let failure = decoder.decode(&json!({ "a": { "b": "d" } })).unwrap_err();
/// assert_eq!(failure.to_string(), "Error at .a.b: expected an Object, got: String");
/// ```
pub struct At<T> {
    keys: Vec<String>,
    inner: BoxDecoder<T>,
}

impl<T: 'static> At<T> {
    /// Creates a decoder reading `decoder` under the chain of `keys`, outermost
    /// key first. An empty chain decodes the input itself.
    pub fn new<K, D>(keys: impl IntoIterator<Item = K>, decoder: D) -> Self
    where
        K: ToString,
        D: Decoder<Output = T> + 'static,
    {
        let keys: Vec<String> = keys.into_iter().map(|k| k.to_string()).collect();
        let inner = keys
            .iter()
            .rev()
            .fold(decoder.boxed(), |nested, key| Field::new(key, nested).boxed());
        Self { keys, inner }
    }
}

impl<T> At<T> {
    /// Returns the key chain, outermost first.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl<T> Decoder for At<T> {
    type Output = T;

    fn decode(&self, value: &Value) -> DecodeResult<T> {
        self.inner.decode(value)
    }
}

/// Decodes an object with arbitrary keys, using one decoder for the keys and
/// one for the values.
///
/// Keys are handed to the key decoder as JSON strings. Entries are decoded in
/// the order the object iterates them and the first failing entry is reported
/// with its key on the path; a failing key additionally has its message prefixed with
/// `invalid key: `.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let scores = Decoders::hash(Decoders::string(), Decoders::integer());
/// let decoded = scores.decode(&json!({ "john": 1, "paul": 2 })).unwrap();
/// assert_eq!(decoded["paul"], 2);
///
/// let failure = scores.decode(&json!({ "john": "one" })).unwrap_err();
/// assert_eq!(failure.to_string(), "Error at .john: expected Integer, got String");
/// ```
#[derive(Debug, Clone)]
pub struct Hash<K, V> {
    key_decoder: K,
    value_decoder: V,
}

impl<K, V> Hash<K, V> {
    /// Creates a decoder for objects whose keys match `key_decoder` and whose
    /// values match `value_decoder`.
    pub fn new(key_decoder: K, value_decoder: V) -> Self {
        Self {
            key_decoder,
            value_decoder,
        }
    }
}

impl<K, V> Decoder for Hash<K, V>
where
    K: Decoder,
    K::Output: StdHash + Eq,
    V: Decoder,
{
    type Output = IndexMap<K::Output, V::Output>;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        let object = value.as_object().ok_or_else(|| not_an_object(value))?;

        let mut decoded = IndexMap::with_capacity(object.len());
        for (raw_key, raw_value) in object {
            let key = self
                .key_decoder
                .decode(&Value::String(raw_key.clone()))
                .map_err(|failure| failure.prefixed("invalid key: ").push(raw_key.as_str()))?;
            let entry = self
                .value_decoder
                .decode(raw_value)
                .map_err(|failure| failure.push(raw_key.as_str()))?;
            decoded.insert(key, entry);
        }
        Ok(decoded)
    }
}

/// Adapts any decoder whose output converts into a `Value`.
struct ValueWrapper<D>(D);

impl<D> Decoder for ValueWrapper<D>
where
    D: Decoder,
    D::Output: Into<Value>,
{
    type Output = Value;

    fn decode(&self, value: &Value) -> DecodeResult<Value> {
        self.0.decode(value).map(Into::into)
    }
}

/// Assembles the outputs of several named decoders into one map.
///
/// Every entry decoder runs against the same input, in insertion order, and
/// the first failure is returned unchanged. The names are only used as keys
/// of the output; to read a key of the input, use [`Field`] inside the entry.
///
/// # Example
///
/// ```rust
/// use decoding::{Decoder, Decoders};
/// use serde_json::json;
///
/// let user = Decoders::record()
///     .entry("id", Decoders::field("userId", Decoders::integer()))
///     .entry("name", Decoders::at(["profile", "name"], Decoders::string()));
///
/// let decoded = user
///     .decode(&json!({ "userId": 1, "profile": { "name": "John" } }))
///     .unwrap();
/// assert_eq!(decoded["id"], json!(1));
/// assert_eq!(decoded["name"], json!("John"));
/// ```
#[derive(Default)]
pub struct Record {
    entries: IndexMap<String, BoxDecoder<Value>>,
}

impl Record {
    /// Creates a record with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named entry. Adding a name twice replaces the earlier decoder
    /// but keeps its position.
    pub fn entry<D>(mut self, name: impl Into<String>, decoder: D) -> Self
    where
        D: Decoder + 'static,
        D::Output: Into<Value>,
    {
        self.entries
            .insert(name.into(), Box::new(ValueWrapper(decoder)));
        self
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Decoder for Record {
    type Output = IndexMap<String, Value>;

    fn decode(&self, value: &Value) -> DecodeResult<Self::Output> {
        self.entries
            .iter()
            .map(|(name, decoder)| -> DecodeResult<(String, Value)> {
                Ok((name.clone(), decoder.decode(value)?))
            })
            .collect()
    }
}
