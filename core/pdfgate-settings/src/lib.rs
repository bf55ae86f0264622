//! Per-site configuration, read from a `pdfgate.toml` file.
//!
//! ```toml
//! [site]
//! home-url = "https://example.org"
//! pretty-permalinks = false
//!
//! [security]
//! logged-out-timeout = 20
//! admin-capabilities = ["gravityforms_view_entries"]
//!
//! [signing]
//! secret = "<64 hex chars>"
//! default-expiry = 86400
//! ```
//!
//! Every section and key is optional. The settings are read once and then
//! passed by reference to the middleware and merge-tag resolver; nothing
//! mutates them during a request.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Capability granting access to every entry's PDFs.
pub const DEFAULT_ADMIN_CAPABILITY: &str = "gravityforms_view_entries";

/// Minutes an anonymous submitter may view their PDF after submitting.
pub const DEFAULT_LOGGED_OUT_TIMEOUT_MINS: u32 = 20;

/// Lifetime of a signed URL when the caller doesn't pick one (one day).
pub const DEFAULT_SIGNED_URL_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Longest signed URL lifetime accepted from configuration (ten years).
pub const MAX_SIGNED_URL_EXPIRY_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("invalid home URL {0:?}: must start with http:// or https://")]
    InvalidHomeUrl(String),

    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error("signed URL expiry must be between 1s and ten years, got {0}s")]
    InvalidExpiry(i64),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Site addressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SiteSettings {
    pub home_url: String,
    pub pretty_permalinks: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            home_url: "http://localhost".to_string(),
            pretty_permalinks: false,
        }
    }
}

/// Access rules shared by every PDF on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SecuritySettings {
    /// Minutes; zero disables the timeout.
    pub logged_out_timeout: u32,
    pub admin_capabilities: Vec<String>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            logged_out_timeout: DEFAULT_LOGGED_OUT_TIMEOUT_MINS,
            admin_capabilities: vec![DEFAULT_ADMIN_CAPABILITY.to_string()],
        }
    }
}

/// Signed-URL configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SigningSettings {
    /// Hex-encoded 32-byte secret.
    pub secret: Option<String>,
    /// Seconds.
    pub default_expiry: i64,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            secret: None,
            default_expiry: DEFAULT_SIGNED_URL_EXPIRY_SECS,
        }
    }
}

/// All pdfgate settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub security: SecuritySettings,
    pub signing: SigningSettings,
}

impl Settings {
    /// Loads settings from `path` if it exists.
    /// Falls back to defaults with a warning on read, parse or validation errors.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}. Falling back to default settings.", e);
                Self::default()
            }
        }
    }

    /// Reads and validates settings from `path`, failing on any error.
    pub fn read(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates settings from a TOML string.
    pub fn from_toml_str(contents: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that serde can't.
    pub fn validate(&self) -> SettingsResult<()> {
        let home = &self.site.home_url;
        if !(home.starts_with("http://") || home.starts_with("https://")) {
            return Err(SettingsError::InvalidHomeUrl(home.clone()));
        }
        if !(1..=MAX_SIGNED_URL_EXPIRY_SECS).contains(&self.signing.default_expiry) {
            return Err(SettingsError::InvalidExpiry(self.signing.default_expiry));
        }
        self.signing_secret()?;
        Ok(())
    }

    /// The logged-out viewing window, or `None` when disabled.
    #[must_use]
    pub fn logged_out_timeout(&self) -> Option<Duration> {
        match self.security.logged_out_timeout {
            0 => None,
            mins => Some(Duration::minutes(i64::from(mins))),
        }
    }

    /// Default lifetime of a signed URL.
    ///
    /// Unvalidated values are clamped into `1..=MAX_SIGNED_URL_EXPIRY_SECS`.
    #[must_use]
    pub fn default_expiry(&self) -> Duration {
        let secs = self
            .signing
            .default_expiry
            .clamp(1, MAX_SIGNED_URL_EXPIRY_SECS);
        Duration::try_seconds(secs).unwrap_or_else(|| Duration::days(1))
    }

    /// Decodes the configured signing secret.
    pub fn signing_secret(&self) -> SettingsResult<Option<[u8; 32]>> {
        let Some(secret) = self.signing.secret.as_deref() else {
            return Ok(None);
        };
        let bytes = hex::decode(secret.trim())
            .map_err(|e| SettingsError::InvalidSecret(format!("not hex: {e}")))?;
        let secret: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            SettingsError::InvalidSecret(format!("expected 32 bytes, got {}", b.len()))
        })?;
        Ok(Some(secret))
    }

    /// Home URL without a trailing slash.
    #[must_use]
    pub fn home_url(&self) -> &str {
        self.site.home_url.trim_end_matches('/')
    }
}
