use alloc::borrow::Cow;

use serde::{Deserialize, Serialize};

/// JOSE header of a compact token.
///
/// Field order is part of the wire format: `{"typ":"JWT","alg":"HS256"}`.
/// Decoded headers borrow from the input unless a value uses escapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header<'a> {
    /// Token type.
    #[serde(borrow)]
    pub typ: Cow<'a, str>,
    /// Signing algorithm.
    #[serde(borrow)]
    pub alg: Cow<'a, str>,
}

impl Header<'static> {
    /// The only header this crate emits.
    pub const HS256: Self = Header {
        typ: Cow::Borrowed("JWT"),
        alg: Cow::Borrowed("HS256"),
    };
}
