use alloc::string::String;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims a load client presents when connecting: subject and expiry, plus
/// any extra claims in insertion order.
///
/// ```rust
/// use wsprobe::Claims;
///
/// let claims = Claims::new("user1", 9_590_186_316).with("channel", "personal:#user1");
/// assert_eq!(
///     serde_json::to_string(&claims).unwrap(),
///     r##"{"sub":"user1","exp":9590186316,"channel":"personal:#user1"}"##
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user the connection authenticates as.
    pub sub: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
    /// Never holds `sub` or `exp`, so serialized keys stay unique.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Claims {
    /// Claims with only `sub` and `exp` set.
    #[must_use]
    pub fn new(sub: impl Into<String>, exp: u64) -> Self {
        Self {
            sub: sub.into(),
            exp,
            extra: Map::new(),
        }
    }

    /// Adds or replaces a claim.
    ///
    /// `sub` and `exp` set the typed fields; a value of the wrong type for
    /// them (not a string, not an unsigned integer) is ignored.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "sub" => match value {
                Value::String(sub) => self.sub = sub,
                other => tracing::debug!(value = %other, "ignoring non-string sub claim"),
            },
            "exp" => match value.as_u64() {
                Some(exp) => self.exp = exp,
                None => tracing::debug!(value = %value, "ignoring non-integer exp claim"),
            },
            _ => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Claims other than `sub` and `exp`, in insertion order.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
