//! HMAC request signing.
use ring::hmac;

/// Authorization scheme prefix placed before `<user>:<signature>`.
pub const AUTH_SCHEME: &str = "HMAC";

/// Computes the lowercase hex HMAC-SHA256 of `message` keyed by `secret`.
#[must_use]
pub fn sign(secret: &str, message: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hex::encode(hmac::sign(&key, message.as_bytes()))
}

/// A user id and shared secret used to sign each request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    secret: String,
}

impl Credentials {
    /// Returns credentials only when both parts are non-empty.
    #[must_use]
    pub fn from_parts(user_id: Option<&str>, secret: Option<&str>) -> Option<Self> {
        match (user_id, secret) {
            (Some(user_id), Some(secret)) if !user_id.is_empty() && !secret.is_empty() => {
                Some(Self {
                    user_id: user_id.to_owned(),
                    secret: secret.to_owned(),
                })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn signature(&self, timestamp: &str) -> String {
        sign(&self.secret, timestamp)
    }

    /// Renders the `Authorization` header value for a request stamped with `timestamp`.
    #[must_use]
    pub fn authorization(&self, timestamp: &str) -> String {
        format!(
            "{} {}:{}",
            AUTH_SCHEME,
            self.user_id,
            self.signature(timestamp)
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
