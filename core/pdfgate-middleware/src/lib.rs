//! Access middleware deciding whether a request may view a PDF.
//!
//! A request for a PDF of an entry runs through an ordered chain of checks.
//! The standard chain is:
//!
//! 1. **active**: inactive PDFs are never served
//! 2. **conditional-logic**: the PDF's rule set must select the entry
//! 3. **public-access**: public PDFs are granted immediately
//! 4. **signed-url**: a valid signed URL is granted immediately; a signed
//!    URL that fails verification is denied
//! 5. **owner**: logged-in users must own the entry or hold an admin
//!    capability
//! 6. **logged-out**: anonymous requests must come from the submitter's IP
//!    within the logged-out timeout
//! 7. **restrict-owner**: when set, only admin capability holders pass
//!
//! The first denying check ends evaluation. Reaching the end of the chain
//! allows the request. Evaluation is a pure function of the PDF
//! configuration, the entry and the [`AccessContext`]; the current time is
//! part of the context.
//!
//! [`AccessGate`] wraps the chain with the form and entry lookups an
//! endpoint needs, mapping collaborator failures to `not_found`.

mod chain;
mod check;
pub mod checks;
mod context;
mod error;
mod gate;
mod logic;
mod store;

pub use chain::AccessChain;
pub use check::{Check, Outcome};
pub use checks::check_visibility;
pub use context::AccessContext;
pub use error::{AccessDenied, AccessResult};
pub use gate::{AccessGate, Authorized};
pub use logic::{ConditionalLogicEvaluator, RuleEvaluator};
pub use store::{EntryStore, FormStore, InMemoryStore, StoreError, StoreResult};
