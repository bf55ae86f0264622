//! Replaces PDF merge tags in text with download URLs.

use pdfgate_middleware::{check_visibility, ConditionalLogicEvaluator};
use pdfgate_types::{Entry, Form};
use regex_lite::Captures;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

use crate::tag::TAG_PATTERN;
use crate::url::{encode_ampersands, PdfAction, PdfUrlBuilder};

/// How tags are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Write `&` as `&#038;` in generated URLs.
    pub encode: bool,
    /// When a tag resolves to nothing, also drop one `<br>`, `<br/>`,
    /// `<br />` or newline directly after it.
    pub strip_trailing_break: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            encode: true,
            strip_trailing_break: false,
        }
    }
}

/// Resolves `{label:pdf:id}` tags against a form's PDFs.
pub struct MergeTagResolver {
    urls: PdfUrlBuilder,
    evaluator: Arc<dyn ConditionalLogicEvaluator>,
}

impl MergeTagResolver {
    pub fn new(urls: PdfUrlBuilder, evaluator: Arc<dyn ConditionalLogicEvaluator>) -> Self {
        Self { urls, evaluator }
    }

    /// Replaces each complete tag with its URL, or with nothing when the
    /// PDF is unknown, inactive or excluded by conditional logic, or when
    /// `entry` doesn't belong to `form`.
    /// Everything else in `text` is left as is.
    pub fn resolve(&self, text: &str, form: &Form, entry: &Entry, encode: bool) -> String {
        self.resolve_with(
            text,
            form,
            entry,
            ResolveOptions {
                encode,
                ..ResolveOptions::default()
            },
        )
    }

    /// Like [`resolve`](Self::resolve), with every option exposed.
    ///
    /// Removing a tag can join its neighbours into a new tag, so passes
    /// repeat until no complete tag is left. Each pass removes at least one
    /// `{`, which bounds the number of passes.
    pub fn resolve_with(
        &self,
        text: &str,
        form: &Form,
        entry: &Entry,
        options: ResolveOptions,
    ) -> String {
        let mut current = text.to_string();
        for _ in 0..=text.matches('{').count() {
            let next = match TAG_PATTERN.replace_all(&current, |caps: &Captures<'_>| {
                self.substitute(caps, form, entry, options)
            }) {
                Cow::Borrowed(_) => break,
                Cow::Owned(next) => next,
            };
            current = next;
        }
        current
    }

    fn substitute(
        &self,
        caps: &Captures<'_>,
        form: &Form,
        entry: &Entry,
        options: ResolveOptions,
    ) -> String {
        let pdf_id = caps.get(2).map_or("", |m| m.as_str());
        let trailing = caps.get(3).map_or("", |m| m.as_str());

        match self.link_for(pdf_id, form, entry, options.encode) {
            Some(url) => format!("{url}{trailing}"),
            None if options.strip_trailing_break => String::new(),
            None => trailing.to_string(),
        }
    }

    fn link_for(&self, pdf_id: &str, form: &Form, entry: &Entry, encode: bool) -> Option<String> {
        if entry.form_id != form.id {
            debug!(entry = %entry.id, entry_form = %entry.form_id, form = %form.id, "entry belongs to another form");
            return None;
        }

        let Some(pdf) = form.pdf_by_str(pdf_id) else {
            debug!(pdf = pdf_id, form = %form.id, "merge tag references unknown PDF");
            return None;
        };

        if let Err(reason) = check_visibility(pdf, entry, self.evaluator.as_ref()) {
            debug!(pdf = pdf_id, entry = %entry.id, reason = reason.code(), "merge tag left empty");
            return None;
        }

        let url = self.urls.url(&pdf.id, entry.id, PdfAction::View);
        Some(if encode { encode_ampersands(&url) } else { url })
    }
}
