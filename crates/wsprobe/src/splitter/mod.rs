//! Splitter: pulls complete top-level JSON objects out of concatenated text.
//!
//! The scan is a three-state machine (`Outside`, `InString`,
//! `InStringEscaped`) plus a signed brace depth. Only `{`, `}`, `"` and `\`
//! are structural and all of them are ASCII, so the scan walks UTF-8 bytes
//! and every fragment boundary falls on a character boundary.
//!
//! A fragment closes when `depth` drops from 1 to 0 outside a string. Only
//! then is it handed to `serde_json`; nothing else about the text is
//! validated during the scan.
//!
//! Invariants
//! - Each input byte is buffered at most once. Fragments that close inside the
//!   chunk they started in are parsed straight from the chunk.
//! - `depth` is only updated in `Outside`.
//! - A dropped fragment always yields a `FragmentError`; a fragment that never
//!   closed never does.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde_json::Value;

use crate::{FragmentError, SplitterOptions};

#[cfg(test)]
mod tests;

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Between tokens; braces count toward depth.
    #[default]
    Outside,
    /// Inside a string literal.
    InString,
    /// Inside a string literal, right after a backslash.
    InStringEscaped,
}

/// Result of scanning one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutcome {
    /// Parsed objects in the order they closed.
    pub values: Vec<Value>,
    /// Fragments that closed but were dropped, in order.
    pub errors: Vec<FragmentError>,
    /// Bytes of an unfinished trailing fragment thrown away at the end of a
    /// one-shot scan. A tail of JSON whitespace only is not counted. Always
    /// zero when partial fragments are retained.
    pub discarded: usize,
}

impl SplitOutcome {
    /// Counts suitable for feeding a metrics sink.
    #[must_use]
    pub fn stats(&self) -> SplitStats {
        SplitStats {
            parsed: self.values.len(),
            dropped: self.errors.len(),
            discarded_bytes: self.discarded,
        }
    }

    /// `true` when nothing was dropped or discarded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.discarded == 0
    }
}

/// Per-call counts of a [`SplitOutcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Objects emitted.
    pub parsed: usize,
    /// Closed fragments dropped with an error.
    pub dropped: usize,
    /// Bytes of unfinished trailing input thrown away.
    pub discarded_bytes: usize,
}

/// Splits `text` into the JSON objects it contains.
///
/// One-shot: an unfinished trailing fragment is discarded, and nothing is
/// carried into later calls.
///
/// ```rust
/// let outcome = wsprobe::split(r#"{"a":}{"b":2}"#);
/// assert_eq!(outcome.values, vec![serde_json::json!({"b": 2})]);
/// assert_eq!(outcome.errors.len(), 1);
/// ```
#[must_use]
pub fn split(text: &str) -> SplitOutcome {
    StreamSplitter::default().feed(text)
}

/// Incremental splitter for back-to-back JSON objects.
///
/// By default each [`feed`](Self::feed) is independent. With
/// [`SplitterOptions::retain_partial`] the scan state carries over so an
/// object may arrive across several chunks; a `}` that would take the depth
/// below zero is then dropped as [`FragmentError::Unbalanced`] so the stream
/// keeps splitting.
#[derive(Debug, Clone, Default)]
pub struct StreamSplitter {
    options: SplitterOptions,
    state: ScanState,
    depth: i64,
    buffer: String,
    /// Length of the current fragment, including bytes not buffered once it
    /// went over the limit.
    pending: usize,
    oversized: bool,
    fragment_start: usize,
    consumed: usize,
}

impl StreamSplitter {
    /// Creates a splitter with the given options.
    #[must_use]
    pub fn new(options: SplitterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current lexical state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Current brace depth. Negative after unbalanced `}` outside strings.
    #[must_use]
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Bytes belonging to the fragment currently being scanned.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending
    }

    /// Bytes of the current fragment held in memory. Never exceeds
    /// `max_fragment_len` when a limit is set.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Scans `chunk` and returns every object that closed inside it.
    pub fn feed(&mut self, chunk: &str) -> SplitOutcome {
        let mut out = SplitOutcome::default();
        // Start of the part of the current fragment that lives in `chunk` and
        // has not been buffered yet.
        let mut start = 0;

        for (i, &byte) in chunk.as_bytes().iter().enumerate() {
            self.pending += 1;
            if !self.oversized
                && self
                    .options
                    .max_fragment_len
                    .is_some_and(|limit| self.pending > limit)
            {
                self.oversized = true;
                self.buffer = String::new();
            }

            let end = i + 1;
            let offset = self.fragment_start;
            let result = match self.step(byte) {
                Step::Continue => continue,
                Step::Underflow => Err(FragmentError::Unbalanced {
                    offset,
                    len: self.pending,
                }),
                Step::Closed if self.oversized => Err(FragmentError::TooLarge {
                    offset,
                    len: self.pending,
                    limit: self.options.max_fragment_len.unwrap_or_default(),
                }),
                Step::Closed if self.buffer.is_empty() => {
                    parse_fragment(&chunk[start..end], offset)
                }
                Step::Closed => {
                    self.buffer.push_str(&chunk[start..end]);
                    parse_fragment(&self.buffer, offset)
                }
            };

            match result {
                Ok(value) => {
                    tracing::trace!(offset, len = self.pending, "fragment complete");
                    out.values.push(value);
                }
                Err(err) => {
                    tracing::warn!(offset, len = self.pending, error = %err, "dropping fragment");
                    out.errors.push(err);
                }
            }

            self.buffer.clear();
            self.depth = 0;
            self.pending = 0;
            self.oversized = false;
            self.fragment_start = self.consumed + end;
            start = end;
        }

        self.consumed += chunk.len();

        if self.options.retain_partial {
            if !self.oversized {
                self.buffer.push_str(&chunk[start..]);
            }
        } else {
            // In one-shot mode the whole pending fragment lies in `chunk`.
            if !is_json_whitespace(&chunk[start..]) {
                tracing::debug!(
                    offset = self.fragment_start,
                    len = self.pending,
                    "discarding unfinished fragment"
                );
                out.discarded = self.pending;
            }
            self.reset();
        }

        out
    }

    /// Ends the stream, returning the unfinished fragment if one was
    /// retained. Trailing JSON whitespace alone is not a fragment.
    #[must_use]
    pub fn finish(self) -> Option<String> {
        (!is_json_whitespace(&self.buffer)).then_some(self.buffer)
    }

    /// Advances the state machine by one byte.
    fn step(&mut self, byte: u8) -> Step {
        match self.state {
            ScanState::InStringEscaped => self.state = ScanState::InString,
            ScanState::InString => match byte {
                b'\\' => self.state = ScanState::InStringEscaped,
                b'"' => self.state = ScanState::Outside,
                _ => {}
            },
            ScanState::Outside => match byte {
                b'"' => self.state = ScanState::InString,
                b'{' => self.depth += 1,
                b'}' => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Step::Closed;
                    }
                    if self.depth < 0 && self.options.retain_partial {
                        return Step::Underflow;
                    }
                }
                _ => {}
            },
        }
        Step::Continue
    }

    fn reset(&mut self) {
        self.state = ScanState::Outside;
        self.depth = 0;
        self.buffer.clear();
        self.pending = 0;
        self.oversized = false;
        self.fragment_start = self.consumed;
    }
}

/// What a single byte did to the scan.
enum Step {
    Continue,
    /// A top-level fragment just closed.
    Closed,
    /// A `}` took the depth below zero while fragments are retained.
    Underflow,
}

fn is_json_whitespace(text: &str) -> bool {
    text.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

fn parse_fragment(text: &str, offset: usize) -> Result<Value, FragmentError> {
    serde_json::from_str(text).map_err(|err| FragmentError::Malformed {
        offset,
        fragment: text.to_string(),
        msg: err.to_string(),
        line: err.line(),
        column: err.column(),
    })
}
