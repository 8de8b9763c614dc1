use alloc::{string::String, vec, vec::Vec};

use serde_json::json;

use super::*;

fn retaining() -> StreamSplitter {
    StreamSplitter::new(SplitterOptions {
        retain_partial: true,
        ..Default::default()
    })
}

#[test]
fn empty_input_yields_nothing() {
    let outcome = split("");
    assert_eq!(outcome, SplitOutcome::default());
    assert!(outcome.is_clean());
}

#[test]
fn back_to_back_objects() {
    let outcome = split(r#"{"id":1,"channel":"personal:#user1"}{"id":2}{}"#);
    assert_eq!(
        outcome.values,
        vec![
            json!({"id": 1, "channel": "personal:#user1"}),
            json!({"id": 2}),
            json!({}),
        ]
    );
    assert!(outcome.is_clean());
}

#[test]
fn nested_objects_close_once() {
    let outcome = split(r#"{"a":{"b":{"c":{}}}}{"d":[{"e":1},{"f":{}}]}"#);
    assert_eq!(
        outcome.values,
        vec![
            json!({"a": {"b": {"c": {}}}}),
            json!({"d": [{"e": 1}, {"f": {}}]}),
        ]
    );
}

#[test]
fn braces_and_escaped_quotes_inside_strings() {
    let outcome = split(r#"{"a":"x}y\"z"}"#);
    assert_eq!(outcome.values, vec![json!({"a": "x}y\"z"})]);

    let outcome = split(r#"{"a":"{{{"}{"b":"\\"}{"c":"}\\\"}"}"#);
    assert_eq!(
        outcome.values,
        vec![json!({"a": "{{{"}), json!({"b": "\\"}), json!({"c": "}\\\"}"})]
    );
    assert!(outcome.errors.is_empty());
}

#[test]
fn trailing_fragment_is_discarded_silently() {
    let outcome = split(r#"{"a":1}{"b":2"#);
    assert_eq!(outcome.values, vec![json!({"a": 1})]);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.discarded, 6);
    assert_eq!(
        outcome.stats(),
        SplitStats {
            parsed: 1,
            dropped: 0,
            discarded_bytes: 6,
        }
    );
}

#[test]
fn malformed_fragment_is_isolated() {
    let outcome = split(r#"{"a":}{"b":2}"#);
    assert_eq!(outcome.values, vec![json!({"b": 2})]);
    assert_eq!(outcome.errors.len(), 1);
    let FragmentError::Malformed {
        offset, fragment, ..
    } = &outcome.errors[0]
    else {
        panic!("expected malformed fragment, got {:?}", outcome.errors[0]);
    };
    assert_eq!(*offset, 0);
    assert_eq!(fragment, r#"{"a":}"#);
    assert_eq!(outcome.discarded, 0);
}

#[test]
fn error_offset_points_into_stream() {
    let outcome = split(r#"{"b":2}{"a":}"#);
    assert_eq!(outcome.values, vec![json!({"b": 2})]);
    assert_eq!(outcome.errors[0].offset(), 7);
}

#[test]
fn whitespace_between_objects_is_accepted() {
    let outcome = split(" {\"a\":1}\n\t{\"b\":2}\r\n");
    assert_eq!(outcome.values, vec![json!({"a": 1}), json!({"b": 2})]);
    assert!(outcome.is_clean());
}

#[test]
fn trailing_whitespace_is_not_discarded() {
    let outcome = split("{\"a\":1}\r\n");
    assert_eq!(outcome.values, vec![json!({"a": 1})]);
    assert_eq!(outcome.discarded, 0);
    assert!(outcome.is_clean());

    let outcome = split("{\"a\":1} x\n");
    assert_eq!(outcome.discarded, 3);

    let mut splitter = retaining();
    assert!(splitter.feed("{\"a\":1}\n ").is_clean());
    assert_eq!(splitter.finish(), None);
}

#[test]
fn leading_garbage_spoils_first_fragment_only() {
    let outcome = split(r#"ok {"a":1}{"b":2}"#);
    assert_eq!(outcome.values, vec![json!({"b": 2})]);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].offset(), 0);
}

#[test]
fn top_level_array_is_not_an_object() {
    let outcome = split(r#"[1,2]{"a":1}"#);
    assert!(outcome.values.is_empty());
    assert!(matches!(outcome.errors[..], [FragmentError::Malformed { .. }]));
}

#[test]
fn stray_closing_brace_unbalances_depth() {
    let mut splitter = StreamSplitter::default();
    let outcome = splitter.feed(r#"}{"a":1}"#);
    assert!(outcome.values.is_empty());
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.discarded, 8);
    // One-shot mode starts over on the next call.
    assert_eq!(splitter.feed(r#"{"a":1}"#).values, vec![json!({"a": 1})]);
}

#[test]
fn retained_stray_closing_brace_is_dropped() {
    let mut splitter = retaining();
    let outcome = splitter.feed(r#" }{"a":1}"#);
    assert_eq!(outcome.values, vec![json!({"a": 1})]);
    assert_eq!(
        outcome.errors,
        vec![FragmentError::Unbalanced { offset: 0, len: 2 }]
    );
    assert_eq!(splitter.depth(), 0);
    assert_eq!(splitter.buffered_len(), 0);
}

#[test]
fn retained_stream_recovers_after_stray_brace() {
    let mut splitter = retaining();
    let outcome = splitter.feed("}");
    assert!(outcome.values.is_empty());
    assert_eq!(outcome.errors[0].offset(), 0);

    let mut emitted = 0;
    for _ in 0..100 {
        let outcome = splitter.feed(r#"{"id":1}"#);
        assert!(outcome.errors.is_empty());
        emitted += outcome.values.len();
    }
    assert_eq!(emitted, 100);
    assert_eq!(splitter.buffered_len(), 0);
    assert_eq!(splitter.finish(), None);
}

#[test]
fn multibyte_text_is_sliced_on_char_boundaries() {
    let outcome = split(r#"{"k":"héllo {"}{"n":"日本語"}"#);
    assert_eq!(
        outcome.values,
        vec![json!({"k": "héllo {"}), json!({"n": "日本語"})]
    );
}

#[test]
fn trailing_backslash_leaves_string_escaped() {
    let mut splitter = retaining();
    let outcome = splitter.feed(r#"{"a":"x\"#);
    assert!(outcome.is_clean());
    assert!(outcome.values.is_empty());
    assert_eq!(splitter.state(), ScanState::InStringEscaped);
    assert_eq!(splitter.depth(), 1);
    assert_eq!(splitter.buffered_len(), 8);
    assert_eq!(splitter.finish().as_deref(), Some(r#"{"a":"x\"#));
}

#[test]
fn one_shot_feeds_are_independent() {
    let mut splitter = StreamSplitter::default();
    let first = splitter.feed(r#"{"a":"#);
    assert!(first.values.is_empty());
    assert_eq!(first.discarded, 5);
    assert_eq!(splitter.state(), ScanState::Outside);
    assert_eq!(splitter.depth(), 0);

    let second = splitter.feed("1}");
    assert!(second.values.is_empty());
    assert!(second.errors.is_empty());
    assert_eq!(second.discarded, 2);
    assert_eq!(splitter.finish(), None);
}

#[test]
fn retained_fragment_spans_chunks() {
    let mut splitter = retaining();
    let chunks = [r#"{"uuid":"1"#, r#"23","text":"a}"#, r#""}{"uu"#, r#"id":"4"}"#];
    let mut values = Vec::new();
    for chunk in chunks {
        let outcome = splitter.feed(chunk);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.discarded, 0);
        values.extend(outcome.values);
    }
    assert_eq!(
        values,
        vec![json!({"uuid": "123", "text": "a}"}), json!({"uuid": "4"})]
    );
    assert_eq!(splitter.finish(), None);
}

#[test]
fn retained_error_offset_spans_chunks() {
    let mut splitter = retaining();
    assert!(splitter.feed(r#"{"a":1}{"b""#).errors.is_empty());
    let outcome = splitter.feed(":}");
    assert_eq!(outcome.errors.len(), 1);
    let FragmentError::Malformed { offset, fragment, .. } = &outcome.errors[0] else {
        panic!("expected malformed fragment");
    };
    assert_eq!(*offset, 7);
    assert_eq!(fragment, r#"{"b":}"#);
}

#[test]
fn oversized_fragment_is_reported_and_skipped() {
    let mut splitter = StreamSplitter::new(SplitterOptions {
        max_fragment_len: Some(10),
        ..Default::default()
    });
    let outcome = splitter.feed(r#"{"big":"0123456789"}{"s":1}"#);
    assert_eq!(outcome.values, vec![json!({"s": 1})]);
    assert_eq!(
        outcome.errors,
        vec![FragmentError::TooLarge {
            offset: 0,
            len: 20,
            limit: 10,
        }]
    );
}

#[test]
fn fragment_at_limit_is_parsed() {
    let mut splitter = StreamSplitter::new(SplitterOptions {
        max_fragment_len: Some(7),
        ..Default::default()
    });
    let outcome = splitter.feed(r#"{"s":1}"#);
    assert_eq!(outcome.values, vec![json!({"s": 1})]);
    assert!(outcome.is_clean());
}

#[test]
fn oversized_retained_fragment_is_not_buffered() {
    let mut splitter = StreamSplitter::new(SplitterOptions {
        retain_partial: true,
        max_fragment_len: Some(8),
    });
    let outcome = splitter.feed(r#"{"text":"a long"#);
    assert!(outcome.is_clean());
    assert_eq!(splitter.pending_len(), 15);
    assert_eq!(splitter.buffered_len(), 0);
    let outcome = splitter.feed(r#" value"}{"ok":1}"#);
    assert_eq!(outcome.values, vec![json!({"ok": 1})]);
    assert_eq!(
        outcome.errors,
        vec![FragmentError::TooLarge {
            offset: 0,
            len: 23,
            limit: 8,
        }]
    );
    assert_eq!(splitter.finish(), None::<String>);
}
