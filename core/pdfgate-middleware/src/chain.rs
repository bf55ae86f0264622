//! Ordered composition of access checks.

use pdfgate_settings::Settings;
use pdfgate_signer::UrlSigner;
use pdfgate_types::{Entry, PdfConfig};
use std::sync::Arc;
use tracing::{debug, info};

use crate::check::{Check, Outcome};
use crate::checks::{
    ActiveCheck, ConditionalLogicCheck, LoggedOutCheck, OwnerCheck, PublicAccessCheck,
    RestrictOwnerCheck, SignedUrlCheck,
};
use crate::context::AccessContext;
use crate::error::AccessResult;
use crate::logic::ConditionalLogicEvaluator;

/// An ordered list of checks evaluated first to last.
#[derive(Default)]
pub struct AccessChain {
    checks: Vec<Box<dyn Check>>,
}

impl AccessChain {
    /// Creates an empty chain, which allows everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard seven-check chain configured from `settings`.
    pub fn standard(
        settings: &Settings,
        signer: Arc<dyn UrlSigner>,
        evaluator: Arc<dyn ConditionalLogicEvaluator>,
    ) -> Self {
        let admin_capabilities = settings.security.admin_capabilities.clone();
        Self::new()
            .with_check(ActiveCheck)
            .with_check(ConditionalLogicCheck::new(evaluator))
            .with_check(PublicAccessCheck)
            .with_check(SignedUrlCheck::new(signer))
            .with_check(OwnerCheck::new(admin_capabilities.clone()))
            .with_check(LoggedOutCheck::new(settings.logged_out_timeout()))
            .with_check(RestrictOwnerCheck::new(admin_capabilities))
    }

    /// Appends a check to the end of the chain.
    #[must_use]
    pub fn with_check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Inserts a check before the check named `before`.
    /// Returns false, leaving the chain unchanged, if no such check exists.
    pub fn insert_before(&mut self, before: &str, check: impl Check + 'static) -> bool {
        match self.checks.iter().position(|c| c.name() == before) {
            Some(index) => {
                self.checks.insert(index, Box::new(check));
                true
            }
            None => false,
        }
    }

    /// Names of the checks in evaluation order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Decides whether the request in `ctx` may view `pdf` for `entry`.
    pub fn evaluate(&self, pdf: &PdfConfig, entry: &Entry, ctx: &AccessContext) -> AccessResult {
        for check in &self.checks {
            match check.check(pdf, entry, ctx) {
                Outcome::Pass => {
                    debug!(check = check.name(), pdf = %pdf.id, entry = %entry.id, "check passed");
                }
                Outcome::Grant => {
                    debug!(check = check.name(), pdf = %pdf.id, entry = %entry.id, "access granted");
                    return Ok(());
                }
                Outcome::Deny(reason) => {
                    info!(
                        check = check.name(),
                        reason = reason.code(),
                        pdf = %pdf.id,
                        entry = %entry.id,
                        "PDF access denied"
                    );
                    return Err(reason);
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for AccessChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessChain")
            .field("checks", &self.check_names())
            .finish()
    }
}
