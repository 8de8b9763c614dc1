//! Base64url helpers for token segments.

use alloc::{string::String, vec::Vec};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::TokenError;

/// Encodes `bytes` as one token segment: URL-safe alphabet, no padding.
#[must_use]
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Converts standard base64 text to its URL-safe, unpadded form.
///
/// `+` and `/` are substituted across the whole string before trailing `=`
/// are stripped.
///
/// ```rust
/// assert_eq!(wsprobe::to_url_safe("a+b/c=="), "a-b_c");
/// ```
#[must_use]
pub fn to_url_safe(standard: &str) -> String {
    let substituted: String = standard
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    String::from(substituted.trim_end_matches('='))
}

pub(crate) fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed("segment is not base64url"))
}
