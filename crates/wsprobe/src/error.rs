use alloc::string::String;

use thiserror::Error;

/// A brace-balanced fragment that was dropped instead of being emitted.
///
/// Fragments that never close are not errors; they show up as
/// [`SplitOutcome::discarded`](crate::SplitOutcome::discarded) or stay pending
/// in the splitter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// The fragment closed but is not valid JSON.
    #[error("malformed fragment at byte {offset}: {msg}")]
    Malformed {
        /// Byte offset of the fragment start in the fed stream.
        offset: usize,
        /// The offending fragment text.
        fragment: String,
        /// Parser message, including the position.
        msg: String,
        /// Line within the fragment, 1-based.
        line: usize,
        /// Column within the fragment, 1-based.
        column: usize,
    },
    /// The fragment outgrew `SplitterOptions::max_fragment_len` and was not
    /// buffered.
    #[error("fragment at byte {offset} is {len} bytes, limit is {limit}")]
    TooLarge {
        /// Byte offset of the fragment start in the fed stream.
        offset: usize,
        /// Total fragment length in bytes.
        len: usize,
        /// Configured limit.
        limit: usize,
    },
    /// A `}` outside any object while partial fragments are retained. The
    /// bytes up to and including it are dropped and the depth resets.
    #[error("unbalanced closing brace in fragment at byte {offset}")]
    Unbalanced {
        /// Byte offset of the fragment start in the fed stream.
        offset: usize,
        /// Bytes dropped, including the brace.
        len: usize,
    },
}

impl FragmentError {
    /// Byte offset of the dropped fragment in the fed stream.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            FragmentError::Malformed { offset, .. }
            | FragmentError::TooLarge { offset, .. }
            | FragmentError::Unbalanced { offset, .. } => *offset,
        }
    }
}

/// Errors from signing or verifying a compact token.
#[cfg(feature = "token")]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Claims could not be serialized, or decoded claims do not match the
    /// requested type.
    #[error("encoding error: {0}")]
    Encoding(String),
    /// The HMAC key was rejected.
    #[error("crypto error: {0}")]
    Crypto(&'static str),
    /// The token is not three base64url segments with an HS256 header.
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    /// The signature does not match the signing input.
    #[error("invalid signature")]
    InvalidSignature,
}

#[cfg(feature = "token")]
impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        use alloc::string::ToString;
        TokenError::Encoding(err.to_string())
    }
}
