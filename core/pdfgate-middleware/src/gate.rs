//! Request-level entry point: look up the entry and PDF, then run the chain.

use pdfgate_types::{Entry, EntryId, Form, PdfConfig, PdfId};
use std::sync::Arc;
use tracing::warn;

use crate::chain::AccessChain;
use crate::context::AccessContext;
use crate::error::{AccessDenied, AccessResult};
use crate::store::{EntryStore, FormStore};

/// Everything a caller needs to go on and generate the PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    pub form: Form,
    pub entry: Entry,
    pub pdf: PdfConfig,
}

/// Resolves a `(pdf id, entry id)` request against the stores and the chain.
pub struct AccessGate {
    forms: Arc<dyn FormStore>,
    entries: Arc<dyn EntryStore>,
    chain: AccessChain,
}

impl AccessGate {
    pub fn new(forms: Arc<dyn FormStore>, entries: Arc<dyn EntryStore>, chain: AccessChain) -> Self {
        Self {
            forms,
            entries,
            chain,
        }
    }

    pub fn chain(&self) -> &AccessChain {
        &self.chain
    }

    /// Authorizes a request for PDF `pdf_id` of entry `entry_id`.
    ///
    /// Store failures of any kind are reported as `not_found`; a PDF id that
    /// is malformed or not configured on the entry's form is `invalid_pdf_id`.
    pub fn authorize(
        &self,
        pdf_id: &str,
        entry_id: EntryId,
        ctx: &AccessContext,
    ) -> AccessResult<Authorized> {
        let pdf_id = PdfId::parse(pdf_id).map_err(|_| AccessDenied::InvalidPdfId)?;

        let entry = self.entries.entry(entry_id).map_err(|e| {
            warn!(entry = %entry_id, "entry lookup failed: {e}");
            AccessDenied::NotFound
        })?;

        let form = self.forms.form(entry.form_id).map_err(|e| {
            warn!(form = %entry.form_id, entry = %entry_id, "form lookup failed: {e}");
            AccessDenied::NotFound
        })?;

        let pdf = form
            .pdf(&pdf_id)
            .cloned()
            .ok_or(AccessDenied::InvalidPdfId)?;

        self.chain.evaluate(&pdf, &entry, ctx)?;

        Ok(Authorized { form, entry, pdf })
    }
}
