//! The interface every access check implements.

use pdfgate_types::{Entry, PdfConfig};

use crate::context::AccessContext;
use crate::error::AccessDenied;

/// Result of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to object to; continue with the next check.
    Pass,
    /// Allow immediately, skipping every remaining check.
    Grant,
    /// Deny; evaluation stops here.
    Deny(AccessDenied),
}

/// One link in an [`AccessChain`](crate::AccessChain).
pub trait Check: Send + Sync {
    /// Stable name used in logs and for positional insertion.
    fn name(&self) -> &'static str;

    fn check(&self, pdf: &PdfConfig, entry: &Entry, ctx: &AccessContext) -> Outcome;
}
