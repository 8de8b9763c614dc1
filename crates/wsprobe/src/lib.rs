//! Client-side helpers for WebSocket load generation.
//!
//! Two independent pieces live here:
//!
//! - [`StreamSplitter`] pulls every complete top-level JSON object out of a
//!   text message that may hold several objects back to back with no
//!   delimiter, such as `{"id":1}{"id":2}`.
//! - [`sign`] / [`TokenSigner`] build HS256 compact tokens
//!   (`header.claims.signature`, each segment base64url without padding) for
//!   connection authentication. Requires the `token` feature (on by default).
//!
//! ```rust
//! let outcome = wsprobe::split(r#"{"a":1}{"b":"x}y"}{"c":"#);
//! assert_eq!(outcome.values.len(), 2);
//! assert!(outcome.errors.is_empty());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod splitter;
#[cfg(feature = "token")]
mod token;


pub use error::FragmentError;
#[cfg(feature = "token")]
pub use error::TokenError;
pub use options::SplitterOptions;
pub use splitter::{ScanState, SplitOutcome, SplitStats, StreamSplitter, split};
#[cfg(feature = "token")]
pub use token::{
    Claims, Header, TokenSigner,
    encoding::{encode_segment, to_url_safe},
    sign, verify,
};
