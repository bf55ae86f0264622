//! Core type definitions for pdfgate.
//!
//! This crate defines the data the access middleware and merge-tag resolver
//! operate on:
//! - Form, entry and user identifiers
//! - PDF configurations attached to a form
//! - Form entries (submissions) and the users requesting them
//! - Conditional-logic rule sets
//!
//! Everything here is plain data supplied by the host's form/entry store.
//! The decisions made on top of it live in `pdfgate-middleware` and
//! `pdfgate-mergetags`.

mod entry;
mod form;
mod ids;
mod logic;
mod pdf;
mod user;

pub use entry::Entry;
pub use form::Form;
pub use ids::{EntryId, FormId, PdfId, UserId};
pub use logic::{ActionType, ConditionalLogic, LogicType, Operator, Rule};
pub use pdf::PdfConfig;
pub use user::{Requester, User};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid PDF id: {0:?}")]
    InvalidPdfId(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
