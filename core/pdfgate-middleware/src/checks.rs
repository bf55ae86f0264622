//! The standard access checks, in chain order.

use chrono::Duration;
use pdfgate_signer::{is_signed, UrlSigner};
use pdfgate_types::{ActionType, Entry, PdfConfig};
use std::sync::Arc;

use crate::check::{Check, Outcome};
use crate::context::AccessContext;
use crate::error::{AccessDenied, AccessResult};
use crate::logic::ConditionalLogicEvaluator;

/// Runs only the checks that don't depend on who is asking: the active
/// flag and conditional logic. Merge tags use this when deciding whether
/// to emit a link at all.
pub fn check_visibility(
    pdf: &PdfConfig,
    entry: &Entry,
    evaluator: &dyn ConditionalLogicEvaluator,
) -> AccessResult {
    if !pdf.active {
        return Err(AccessDenied::PdfInactive);
    }
    if !passes_conditional_logic(pdf, entry, evaluator) {
        return Err(AccessDenied::ConditionalLogic);
    }
    Ok(())
}

fn passes_conditional_logic(
    pdf: &PdfConfig,
    entry: &Entry,
    evaluator: &dyn ConditionalLogicEvaluator,
) -> bool {
    let Some(logic) = &pdf.conditional_logic else {
        return true;
    };
    let matched = evaluator.matches(logic, entry);
    match logic.action_type {
        ActionType::Show => matched,
        ActionType::Hide => !matched,
    }
}

/// Denies inactive PDFs.
#[derive(Debug, Default)]
pub struct ActiveCheck;

impl Check for ActiveCheck {
    fn name(&self) -> &'static str {
        "active"
    }

    fn check(&self, pdf: &PdfConfig, _entry: &Entry, _ctx: &AccessContext) -> Outcome {
        if pdf.active {
            Outcome::Pass
        } else {
            Outcome::Deny(AccessDenied::PdfInactive)
        }
    }
}

/// Denies entries the PDF's conditional logic excludes.
pub struct ConditionalLogicCheck {
    evaluator: Arc<dyn ConditionalLogicEvaluator>,
}

impl ConditionalLogicCheck {
    pub fn new(evaluator: Arc<dyn ConditionalLogicEvaluator>) -> Self {
        Self { evaluator }
    }
}

impl Check for ConditionalLogicCheck {
    fn name(&self) -> &'static str {
        "conditional-logic"
    }

    fn check(&self, pdf: &PdfConfig, entry: &Entry, _ctx: &AccessContext) -> Outcome {
        if passes_conditional_logic(pdf, entry, self.evaluator.as_ref()) {
            Outcome::Pass
        } else {
            Outcome::Deny(AccessDenied::ConditionalLogic)
        }
    }
}

/// Grants public PDFs.
#[derive(Debug, Default)]
pub struct PublicAccessCheck;

impl Check for PublicAccessCheck {
    fn name(&self) -> &'static str {
        "public-access"
    }

    fn check(&self, pdf: &PdfConfig, _entry: &Entry, _ctx: &AccessContext) -> Outcome {
        if pdf.public_access {
            Outcome::Grant
        } else {
            Outcome::Pass
        }
    }
}

/// Grants requests carrying a valid signed URL and denies tampered or
/// expired ones. Unsigned requests pass through.
pub struct SignedUrlCheck {
    signer: Arc<dyn UrlSigner>,
}

impl SignedUrlCheck {
    pub fn new(signer: Arc<dyn UrlSigner>) -> Self {
        Self { signer }
    }
}

impl Check for SignedUrlCheck {
    fn name(&self) -> &'static str {
        "signed-url"
    }

    fn check(&self, _pdf: &PdfConfig, _entry: &Entry, ctx: &AccessContext) -> Outcome {
        if !is_signed(&ctx.request_url) {
            return Outcome::Pass;
        }
        if self.signer.verify_at(&ctx.request_url, ctx.now) {
            Outcome::Grant
        } else {
            Outcome::Deny(AccessDenied::InvalidSignature)
        }
    }
}

/// Logged-in users must own the entry or hold an admin capability.
#[derive(Debug)]
pub struct OwnerCheck {
    admin_capabilities: Vec<String>,
}

impl OwnerCheck {
    pub fn new(admin_capabilities: Vec<String>) -> Self {
        Self { admin_capabilities }
    }
}

impl Check for OwnerCheck {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn check(&self, _pdf: &PdfConfig, entry: &Entry, ctx: &AccessContext) -> Outcome {
        let Some(user) = ctx.user() else {
            return Outcome::Pass;
        };
        if entry.is_owned_by(user.id) || user.has_any_capability(self.admin_capabilities.as_slice()) {
            Outcome::Pass
        } else {
            Outcome::Deny(AccessDenied::NotOwner)
        }
    }
}

/// Anonymous requests must come from the submitter's IP, and within the
/// timeout after submission when one is configured.
#[derive(Debug)]
pub struct LoggedOutCheck {
    timeout: Option<Duration>,
}

impl LoggedOutCheck {
    /// `None` disables the timeout; the IP must still match.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl Check for LoggedOutCheck {
    fn name(&self) -> &'static str {
        "logged-out"
    }

    fn check(&self, _pdf: &PdfConfig, entry: &Entry, ctx: &AccessContext) -> Outcome {
        if ctx.requester.is_authenticated() {
            return Outcome::Pass;
        }

        let ip_matches = matches!((ctx.remote_ip, entry.ip), (Some(a), Some(b)) if a == b);
        let within_timeout = self
            .timeout
            .is_none_or(|timeout| ctx.now - entry.date_created <= timeout);

        if ip_matches && within_timeout {
            Outcome::Pass
        } else {
            Outcome::Deny(AccessDenied::NotAuthorized)
        }
    }
}

/// When the PDF restricts owners, only admin capability holders pass.
#[derive(Debug)]
pub struct RestrictOwnerCheck {
    admin_capabilities: Vec<String>,
}

impl RestrictOwnerCheck {
    pub fn new(admin_capabilities: Vec<String>) -> Self {
        Self { admin_capabilities }
    }
}

impl Check for RestrictOwnerCheck {
    fn name(&self) -> &'static str {
        "restrict-owner"
    }

    fn check(&self, pdf: &PdfConfig, _entry: &Entry, ctx: &AccessContext) -> Outcome {
        if !pdf.restrict_owner {
            return Outcome::Pass;
        }
        match ctx.user() {
            Some(user) if user.has_any_capability(self.admin_capabilities.as_slice()) => Outcome::Pass,
            _ => Outcome::Deny(AccessDenied::Restricted),
        }
    }
}
