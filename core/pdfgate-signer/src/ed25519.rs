//! Ed25519-backed URL signer.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use tracing::debug;

use crate::error::{SignerError, SignerResult};
use crate::query::{SignedParts, SplitUrl, EXPIRES_PARAM, SIGNATURE_PARAM};
use crate::UrlSigner;

/// Signs URLs with an Ed25519 key derived from a 32-byte site secret.
pub struct Ed25519UrlSigner {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519UrlSigner {
    /// Creates a signer from a raw 32-byte secret.
    #[must_use]
    pub fn from_secret(secret: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Creates a signer from a hex-encoded 32-byte secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the string isn't hex or doesn't decode to 32 bytes.
    pub fn from_hex(secret: &str) -> SignerResult<Self> {
        let bytes = hex::decode(secret.trim())
            .map_err(|e| SignerError::InvalidSecret(format!("not hex: {e}")))?;
        let secret: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            SignerError::InvalidSecret(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Self::from_secret(&secret))
    }

    /// Generates a signer with a fresh random secret.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Returns the hex-encoded secret, for persisting a generated signer.
    #[must_use]
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    fn message(unsigned: &str, expires: i64) -> String {
        format!("{unsigned}::{expires}")
    }
}

impl fmt::Debug for Ed25519UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519UrlSigner")
            .field("verifying_key", &hex::encode(self.verifying_key.to_bytes()))
            .finish_non_exhaustive()
    }
}

impl UrlSigner for Ed25519UrlSigner {
    fn sign_at(&self, url: &str, expires_at: DateTime<Utc>) -> String {
        let split = SplitUrl::parse(url);
        let unsigned = split.unsigned();
        let expires = expires_at.timestamp();

        let signature = self
            .signing_key
            .sign(Self::message(&unsigned, expires).as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());

        let separator = if unsigned.contains('?') { '&' } else { '?' };
        let mut signed = format!(
            "{unsigned}{separator}{EXPIRES_PARAM}={expires}&{SIGNATURE_PARAM}={signature_b64}"
        );
        if let Some(fragment) = split.fragment {
            signed.push('#');
            signed.push_str(fragment);
        }
        signed
    }

    fn verify_at(&self, url: &str, now: DateTime<Utc>) -> bool {
        // Only the exact bytes `sign_at` emits verify.
        let Some(parts) = SignedParts::parse(url) else {
            debug!("URL does not end in a single canonical expires/signature pair");
            return false;
        };
        if now.timestamp() > parts.expires {
            debug!(expires = parts.expires, "signed URL expired");
            return false;
        }

        let Ok(signature_bytes) = URL_SAFE_NO_PAD.decode(parts.signature) else {
            debug!("signed URL signature is not base64url");
            return false;
        };
        let Ok(signature) = Signature::from_slice(&signature_bytes) else {
            debug!("signed URL signature has the wrong length");
            return false;
        };

        let message = Self::message(parts.unsigned, parts.expires);
        self.verifying_key
            .verify(message.as_bytes(), &signature)
            .is_ok()
    }
}
