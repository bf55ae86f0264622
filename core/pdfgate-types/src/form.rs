//! Forms and their configured PDFs.

use serde::{Deserialize, Serialize};

use crate::ids::{FormId, PdfId};
use crate::pdf::PdfConfig;

/// A form together with the PDFs configured on it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pdfs: Vec<PdfConfig>,
}

impl Form {
    #[must_use]
    pub fn new(id: FormId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            pdfs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_pdf(mut self, pdf: PdfConfig) -> Self {
        self.pdfs.push(pdf);
        self
    }

    /// Looks up a configured PDF by id.
    #[must_use]
    pub fn pdf(&self, id: &PdfId) -> Option<&PdfConfig> {
        self.pdfs.iter().find(|pdf| &pdf.id == id)
    }

    /// Looks up a configured PDF by its raw id string.
    #[must_use]
    pub fn pdf_by_str(&self, id: &str) -> Option<&PdfConfig> {
        self.pdfs.iter().find(|pdf| pdf.id.as_str() == id)
    }
}
