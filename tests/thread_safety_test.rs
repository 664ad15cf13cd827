//! Tests for sharing decoders and symbols across threads.

use decoding::{decode, Decoder, Decoders, Symbol};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_decoding() {
    let decoder = Arc::new(Decoders::map(
        (
            Decoders::field("name", Decoders::string()),
            Decoders::field("age", Decoders::integer()),
        ),
        |(name, age)| format!("{} ({})", name, age),
    ));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let result = decode(&decoder, &json!({
                    "name": format!("User{}", i),
                    "age": 20 + i
                }));
                assert_eq!(result, Ok(format!("User{} ({})", i, 20 + i)));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let decoder = Arc::new(Decoders::array(Decoders::integer()).boxed());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let decoder = Arc::clone(&decoder);
            thread::spawn(move || {
                let mut items = vec![json!(0); 8];
                items[i] = json!("bad");
                let failure = decoder.decode(&json!(items)).unwrap_err();
                assert_eq!(
                    failure.to_string(),
                    format!("Error at .{}: expected Integer, got String", i)
                );
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_symbol_interning() {
    let handles: Vec<_> = (0..10)
        .map(|_| thread::spawn(|| decode(&Decoders::symbol(), &json!("concurrent")).unwrap()))
        .collect();

    let symbols: Vec<Symbol> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected = Symbol::intern("concurrent");
    for symbol in symbols {
        assert_eq!(symbol, expected);
    }
}

#[test]
fn test_decoders_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    assert_send_sync(&Decoders::string());
    assert_send_sync(&Decoders::record().entry("a", Decoders::integer()));
    assert_send_sync(&Decoders::any(vec![Decoders::integer().boxed()]));
    assert_send_sync(&Decoders::at(["a", "b"], Decoders::boolean()));
}
