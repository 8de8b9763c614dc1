//! HS256 compact tokens.
//!
//! A token is `base64url(header) "." base64url(claims) "." base64url(mac)`
//! where `mac` is HMAC-SHA-256 over the first two segments joined by `.`.
//! Any standard HS256 verifier accepts the output.

use alloc::{string::String, vec::Vec};
use core::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use serde::{Serialize, de::DeserializeOwned};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::TokenError;

mod claims;
pub mod encoding;
mod header;


pub use claims::Claims;
pub use header::Header;

use encoding::{decode_segment, encode_segment, to_url_safe};

type HmacSha256 = Hmac<Sha256>;

/// Signs `claims` with `secret`, returning a compact token.
///
/// # Errors
///
/// [`TokenError::Encoding`] if `claims` cannot be serialized to JSON,
/// [`TokenError::Crypto`] if `secret` is empty.
///
/// ```rust
/// let token = wsprobe::sign(&wsprobe::Claims::new("user1", 9_590_186_316), b"secret")?;
/// assert_eq!(token.matches('.').count(), 2);
/// # Ok::<(), wsprobe::TokenError>(())
/// ```
pub fn sign<C: Serialize + ?Sized>(claims: &C, secret: &[u8]) -> Result<String, TokenError> {
    let mut mac = keyed_mac(secret)?;
    let claims = serde_json::to_vec(claims)?;
    let header = serde_json::to_vec(&Header::HS256)?;

    let mut token = encode_segment(&header);
    token.push('.');
    token.push_str(&encode_segment(&claims));

    mac.update(token.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());
    token.push('.');
    token.push_str(&to_url_safe(&signature));

    tracing::debug!(len = token.len(), "signed HS256 token");
    Ok(token)
}

/// Checks the signature of `token` against `secret` and decodes its claims.
///
/// # Errors
///
/// [`TokenError::Malformed`] if the token is not three base64url segments
/// with an HS256 header, [`TokenError::InvalidSignature`] on a MAC mismatch,
/// [`TokenError::Encoding`] if the claims do not decode as `T`, and
/// [`TokenError::Crypto`] if `secret` is empty.
pub fn verify<T: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<T, TokenError> {
    let mut mac = keyed_mac(secret)?;

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or(TokenError::Malformed("expected three segments"))?;
    let (header, claims) = signing_input
        .split_once('.')
        .ok_or(TokenError::Malformed("expected three segments"))?;
    if claims.contains('.') {
        return Err(TokenError::Malformed("expected three segments"));
    }

    let header = decode_segment(header)?;
    let header: Header<'_> = serde_json::from_slice(&header)
        .map_err(|_| TokenError::Malformed("unreadable header"))?;
    if header.alg != Header::HS256.alg {
        return Err(TokenError::Malformed("unsupported algorithm"));
    }

    let signature = decode_segment(signature)?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims = decode_segment(claims)?;
    Ok(serde_json::from_slice(&claims)?)
}

fn keyed_mac(secret: &[u8]) -> Result<HmacSha256, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Crypto("empty secret"));
    }
    HmacSha256::new_from_slice(secret).map_err(|_| TokenError::Crypto("invalid HMAC key"))
}

/// Holds a shared secret and signs or verifies tokens with it.
///
/// The secret is wiped from memory on drop. A signer is immutable, so one
/// instance can serve many connections from several threads.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Zeroizing<Vec<u8>>,
}

impl TokenSigner {
    /// Creates a signer.
    ///
    /// # Errors
    ///
    /// [`TokenError::Crypto`] if `secret` is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(TokenError::Crypto("empty secret"));
        }
        Ok(Self { secret })
    }

    /// Signs `claims`. See [`sign`].
    ///
    /// # Errors
    ///
    /// [`TokenError::Encoding`] if `claims` cannot be serialized.
    pub fn sign<C: Serialize + ?Sized>(&self, claims: &C) -> Result<String, TokenError> {
        sign(claims, &self.secret)
    }

    /// Verifies `token` and decodes its claims. See [`verify`].
    ///
    /// # Errors
    ///
    /// As [`verify`].
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        verify(token, &self.secret)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"<redacted>")
            .finish()
    }
}
