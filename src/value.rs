//! Type tags for input values and interned symbols.
//!
//! [`ValueKind`] names the shape of a `serde_json::Value` and is what type
//! mismatch messages print. [`Symbol`] is the output of the `symbol` decoder.

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde_json::Value;

/// The type of a JSON value, as named in decode failures.
///
/// `Numeric` is only ever an expected kind (integers and floats alike);
/// [`ValueKind::of`] never returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    True,
    False,
    Integer,
    Float,
    Numeric,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of the given value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(true) => ValueKind::True,
            Value::Bool(false) => ValueKind::False,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns true if `value` is of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::Numeric => value.is_number(),
            kind => *kind == ValueKind::of(value),
        }
    }

    /// Returns the name of this kind (e.g. `Integer`).
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::True => "True",
            ValueKind::False => "False",
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::Numeric => "Numeric",
            ValueKind::String => "String",
            ValueKind::Array => "Array",
            ValueKind::Object => "Object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type SymbolTable = RwLock<HashSet<Arc<str>>>;

fn symbol_table() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(HashSet::new()))
}

/// An interned string.
///
/// Interning the same text twice returns symbols that share one allocation,
/// so equality is a pointer comparison.
///
/// # Example
///
/// ```rust
/// use decoding::Symbol;
///
/// let a = Symbol::intern("foo");
/// let b = Symbol::intern(String::from("foo"));
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "foo");
/// ```
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Returns the symbol for `text`, creating it on first use.
    pub fn intern(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if let Some(existing) = symbol_table().read().get(text) {
            return Symbol(Arc::clone(existing));
        }

        let mut table = symbol_table().write();
        // another thread may have interned it between the two locks
        if let Some(existing) = table.get(text) {
            return Symbol(Arc::clone(existing));
        }
        let interned: Arc<str> = Arc::from(text);
        table.insert(Arc::clone(&interned));
        Symbol(interned)
    }

    /// Returns the text of this symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::True);
        assert_eq!(ValueKind::of(&json!(false)), ValueKind::False);
        assert_eq!(ValueKind::of(&json!(1)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!("a")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_numeric_matches_integers_and_floats() {
        assert!(ValueKind::Numeric.matches(&json!(1)));
        assert!(ValueKind::Numeric.matches(&json!(1.5)));
        assert!(!ValueKind::Numeric.matches(&json!("1")));
    }

    #[test]
    fn test_float_does_not_match_integer() {
        assert!(ValueKind::Float.matches(&json!(1.0)));
        assert!(!ValueKind::Float.matches(&json!(1)));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Integer.to_string(), "Integer");
        assert_eq!(ValueKind::Null.to_string(), "Null");
    }

    #[test]
    fn test_symbols_share_allocation() {
        let a = Symbol::intern("shared");
        let b = Symbol::intern("shared");
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_ne!(a, Symbol::intern("other"));
    }

    #[test]
    fn test_symbol_debug() {
        assert_eq!(format!("{:?}", Symbol::intern("foo")), ":foo");
    }
}
