//! Deny reasons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a request may not view a PDF.
///
/// These are policy outcomes, not faults: the caller turns them into a
/// redirect, a 403 or an omitted link. Serializes as its [`code`](Self::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDenied {
    #[error("PDF is inactive")]
    PdfInactive,

    #[error("PDF conditional logic excludes this entry")]
    ConditionalLogic,

    #[error("signed URL is invalid or expired")]
    InvalidSignature,

    #[error("current user does not own this entry")]
    NotOwner,

    #[error("not authorized to view this PDF")]
    NotAuthorized,

    #[error("PDF is restricted to administrators")]
    Restricted,

    #[error("entry or form not found")]
    NotFound,

    #[error("invalid PDF id")]
    InvalidPdfId,
}

impl AccessDenied {
    /// Machine-readable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PdfInactive => "pdf_inactive",
            Self::ConditionalLogic => "conditional_logic",
            Self::InvalidSignature => "invalid_signature",
            Self::NotOwner => "not_owner",
            Self::NotAuthorized => "not_authorized",
            Self::Restricted => "restricted",
            Self::NotFound => "not_found",
            Self::InvalidPdfId => "invalid_pdf_id",
        }
    }

    /// Returns true when logging in might change the outcome.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::NotAuthorized | Self::InvalidSignature)
    }
}

/// `Ok(())` means the request may proceed to generation.
pub type AccessResult<T = ()> = Result<T, AccessDenied>;
