//! Signed URLs granting time-boxed access to a PDF without logging in.
//!
//! A signed URL carries two extra query parameters:
//! - `expires`: unix timestamp (seconds) after which the URL stops working
//! - `signature`: `base64url(ed25519(url + "::" + expires))`
//!
//! The signed message is the URL with both parameters (and any fragment)
//! removed, so a URL verifies exactly when the request path, every other
//! query parameter, the expiry and the signature are untouched.
//!
//! The secret is process-wide configuration. Signing is deterministic: the
//! same URL, secret and expiry always yield the same signature.

mod ed25519;
mod error;
mod query;

use chrono::{DateTime, Duration, Utc};

pub use ed25519::Ed25519UrlSigner;
pub use error::{SignerError, SignerResult};
pub use query::{is_signed, EXPIRES_PARAM, SIGNATURE_PARAM};

/// Signs URLs and verifies previously signed ones.
pub trait UrlSigner: Send + Sync {
    /// Signs `url` so it verifies until `expires_at`.
    fn sign_at(&self, url: &str, expires_at: DateTime<Utc>) -> String;

    /// Returns true if `url` carries a valid, unexpired signature at `now`.
    fn verify_at(&self, url: &str, now: DateTime<Utc>) -> bool;

    /// Signs `url` so it verifies for `expires_in` from now.
    ///
    /// # Errors
    ///
    /// Returns an error if `expires_in` is not positive or the expiry
    /// falls outside the representable date range.
    fn sign(&self, url: &str, expires_in: Duration) -> SignerResult<String> {
        let invalid = || SignerError::InvalidExpiry(expires_in.num_seconds());
        if expires_in <= Duration::zero() {
            return Err(invalid());
        }
        let expires_at = Utc::now().checked_add_signed(expires_in).ok_or_else(invalid)?;
        Ok(self.sign_at(url, expires_at))
    }

    /// Returns true if `url` carries a valid, unexpired signature now.
    fn verify(&self, url: &str) -> bool {
        self.verify_at(url, Utc::now())
    }
}
