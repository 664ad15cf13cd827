//! Tests for decoders that refer to themselves.

use decoding::{decode, BoxDecoder, Decoder, Decoders};
use serde_json::json;

#[derive(Debug, PartialEq)]
struct Tree {
    value: i64,
    children: Vec<Tree>,
}

// The nested decoder is built on demand, so recursion ends with the input
fn tree() -> BoxDecoder<Tree> {
    Decoders::from_fn(|value| {
        Decoders::map(
            (
                Decoders::field("value", Decoders::integer()),
                Decoders::field("children", Decoders::array(tree())),
            ),
            |(root, children)| Tree {
                value: root,
                children,
            },
        )
        .decode(value)
    })
    .boxed()
}

fn leaf(value: i64) -> Tree {
    Tree {
        value,
        children: vec![],
    }
}

#[test]
fn test_recursive_tree() {
    let input = json!({
        "value": 1,
        "children": [
            { "value": 2, "children": [] },
            { "value": 3, "children": [{ "value": 4, "children": [] }] }
        ]
    });

    assert_eq!(
        decode(&tree(), &input),
        Ok(Tree {
            value: 1,
            children: vec![
                leaf(2),
                Tree {
                    value: 3,
                    children: vec![leaf(4)]
                }
            ]
        })
    );
}

#[test]
fn test_recursive_failure_path() {
    let input = json!({
        "value": 1,
        "children": [
            { "value": 2, "children": [] },
            { "value": 3, "children": [{ "value": "4", "children": [] }] }
        ]
    });

    let failure = decode(&tree(), &input).unwrap_err();
    assert_eq!(
        failure.to_string(),
        "Error at .children.1.children.0.value: expected Integer, got String"
    );
}

#[test]
fn test_deeply_nested_input() {
    let mut input = json!({ "value": 0, "children": [] });
    for depth in 1..=50 {
        input = json!({ "value": depth, "children": [input] });
    }

    let mut decoded = decode(&tree(), &input).unwrap();
    let mut depth = 50;
    while let Some(child) = decoded.children.pop() {
        assert_eq!(decoded.value, depth);
        decoded = child;
        depth -= 1;
    }
    assert_eq!(depth, 0);
}
