#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};
use wsprobe::{SplitterOptions, StreamSplitter};

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(16)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3..=8 => Value::String(u.arbitrary()?),
            9..=11 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => Value::Object(arbitrary_object(u)?),
        };
        Ok(ArbitraryValue(value))
    }
}

fn arbitrary_object(u: &mut Unstructured<'_>) -> arbitrary::Result<Map<String, Value>> {
    let fields: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
    Ok(fields.into_iter().map(|(k, v)| (k, v.0)).collect())
}

#[derive(Debug)]
struct Input {
    objects: Vec<Value>,
    noise: String,
    split_seed: u64,
    limit: Option<u16>,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let count = u.int_in_range(0..=8)?;
        let mut objects = Vec::with_capacity(count);
        for _ in 0..count {
            objects.push(Value::Object(arbitrary_object(u)?));
        }
        Ok(Input {
            objects,
            noise: u.arbitrary()?,
            split_seed: u.arbitrary()?,
            limit: u.arbitrary()?,
        })
    }
}

/// Split a UTF-8 `&str` into boundary-safe chunks using a deterministic seed.
fn split_into_safe_chunks(text: &str, split_seed: u64) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = text.len();

    while start < len {
        let remaining = len - start;
        let mut size = (split_seed as usize % remaining) + 1;
        while start + size < len && !text.is_char_boundary(start + size) {
            size += 1;
        }
        chunks.push(&text[start..start + size]);
        start += size;
    }

    chunks
}

fn check(input: Input) {
    let payload: String = input.objects.iter().map(Value::to_string).collect();

    // Well-formed concatenations come back unchanged, whole or chunked.
    let outcome = wsprobe::split(&payload);
    assert!(outcome.is_clean());
    assert_eq!(outcome.values, input.objects);

    let mut splitter = StreamSplitter::new(SplitterOptions {
        retain_partial: true,
        ..Default::default()
    });
    let mut values = Vec::new();
    for chunk in split_into_safe_chunks(&payload, input.split_seed) {
        let outcome = splitter.feed(chunk);
        assert!(outcome.errors.is_empty());
        values.extend(outcome.values);
    }
    assert_eq!(values, input.objects);
    assert!(splitter.finish().is_none());

    // Noise must never panic, and a size limit bounds what is buffered.
    let noisy = format!("{}{payload}", input.noise);
    let mut splitter = StreamSplitter::new(SplitterOptions {
        retain_partial: true,
        max_fragment_len: input.limit.map(usize::from),
    });
    for chunk in split_into_safe_chunks(&noisy, input.split_seed) {
        let outcome = splitter.feed(chunk);
        assert!(outcome.values.iter().all(Value::is_object));
        if let Some(limit) = input.limit {
            assert!(splitter.buffered_len() <= usize::from(limit));
        }
    }
}

fuzz_target!(|input: Input| check(input));
