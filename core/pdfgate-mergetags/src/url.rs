//! Canonical PDF download URLs.

use chrono::Duration;
use pdfgate_settings::Settings;
use pdfgate_signer::{SignerResult, UrlSigner};
use pdfgate_types::{EntryId, PdfId};
use serde::{Deserialize, Serialize};

/// What the link should do when opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfAction {
    /// Display inline in the browser.
    #[default]
    View,
    /// Force a file download.
    Download,
    /// Open the browser's print dialog.
    Print,
}

impl PdfAction {
    fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::View => None,
            Self::Download => Some("download"),
            Self::Print => Some("print"),
        }
    }
}

/// Builds download URLs relative to the site's home URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUrlBuilder {
    home_url: String,
    pretty_permalinks: bool,
}

impl PdfUrlBuilder {
    pub fn new(home_url: impl Into<String>) -> Self {
        let home_url: String = home_url.into();
        Self {
            home_url: home_url.trim_end_matches('/').to_string(),
            pretty_permalinks: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.home_url()).with_pretty_permalinks(settings.site.pretty_permalinks)
    }

    #[must_use]
    pub fn with_pretty_permalinks(mut self, enabled: bool) -> Self {
        self.pretty_permalinks = enabled;
        self
    }

    /// The raw URL, with literal `&` separators.
    ///
    /// `<home>/?gpdf=1&pid=<pdf>&lid=<entry>[&action=..]`, or
    /// `<home>/pdf/<pdf>/<entry>/[action/]` with pretty permalinks.
    #[must_use]
    pub fn url(&self, pdf_id: &PdfId, entry_id: EntryId, action: PdfAction) -> String {
        let home = &self.home_url;
        match (self.pretty_permalinks, action.as_param()) {
            (false, None) => format!("{home}/?gpdf=1&pid={pdf_id}&lid={entry_id}"),
            (false, Some(a)) => format!("{home}/?gpdf=1&pid={pdf_id}&lid={entry_id}&action={a}"),
            (true, None) => format!("{home}/pdf/{pdf_id}/{entry_id}/"),
            (true, Some(a)) => format!("{home}/pdf/{pdf_id}/{entry_id}/{a}/"),
        }
    }

    /// A raw URL signed to work without logging in for `expires_in`.
    pub fn signed_url(
        &self,
        pdf_id: &PdfId,
        entry_id: EntryId,
        action: PdfAction,
        signer: &dyn UrlSigner,
        expires_in: Duration,
    ) -> SignerResult<String> {
        signer.sign(&self.url(pdf_id, entry_id, action), expires_in)
    }
}

/// HTML-encodes `&` as `&#038;` for embedding in markup.
#[must_use]
pub fn encode_ampersands(url: &str) -> String {
    url.replace('&', "&#038;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> PdfId {
        PdfId::parse("556690c67856b").unwrap()
    }

    #[test]
    fn plain_urls() {
        let builder = PdfUrlBuilder::new("http://example.org/");
        assert_eq!(
            builder.url(&id(), EntryId(1), PdfAction::View),
            "http://example.org/?gpdf=1&pid=556690c67856b&lid=1"
        );
        assert_eq!(
            builder.url(&id(), EntryId(1), PdfAction::Download),
            "http://example.org/?gpdf=1&pid=556690c67856b&lid=1&action=download"
        );
    }

    #[test]
    fn pretty_urls() {
        let builder = PdfUrlBuilder::new("https://example.org").with_pretty_permalinks(true);
        assert_eq!(
            builder.url(&id(), EntryId(7), PdfAction::View),
            "https://example.org/pdf/556690c67856b/7/"
        );
        assert_eq!(
            builder.url(&id(), EntryId(7), PdfAction::Print),
            "https://example.org/pdf/556690c67856b/7/print/"
        );
    }

    #[test]
    fn encodes_every_ampersand() {
        assert_eq!(encode_ampersands("a?b=1&c=2&d=3"), "a?b=1&#038;c=2&#038;d=3");
        assert_eq!(encode_ampersands("no-query"), "no-query");
    }
}
