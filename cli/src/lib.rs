//! Library side of the `pdfgate` tool: fixture loading and the operations
//! behind each subcommand, kept out of `main` so they can be tested.

use anyhow::{Context, Result, anyhow};
use chrono::Duration;
use pdfgate_mergetags::{MergeTagResolver, PdfUrlBuilder, ResolveOptions, TagDescriptor, available_tags};
use pdfgate_middleware::{
    AccessChain, AccessContext, AccessGate, AccessResult, Authorized, EntryStore, FormStore,
    InMemoryStore, RuleEvaluator,
};
use pdfgate_settings::Settings;
use pdfgate_signer::{Ed25519UrlSigner, UrlSigner};
use pdfgate_types::{EntryId, FormId, Requester, User, UserId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Forms, entries and users read from a JSON fixture.
///
/// ```json
/// { "forms": [...], "entries": [...], "users": [...] }
/// ```
pub struct Fixture {
    store: Arc<InMemoryStore>,
    users: BTreeMap<UserId, User>,
}

#[derive(Deserialize)]
struct Users {
    #[serde(default)]
    users: Vec<User>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        let store = InMemoryStore::from_json(json)?;
        let Users { users } = serde_json::from_str(json).context("invalid users in fixture")?;
        Ok(Self {
            store: Arc::new(store),
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load fixture {}", path.display()))
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| anyhow!("user {id} not in fixture"))
    }

    /// Builds the request context for `user`, or an anonymous one.
    pub fn context(
        &self,
        user: Option<UserId>,
        remote_ip: Option<IpAddr>,
        request_url: Option<&str>,
    ) -> Result<AccessContext> {
        let requester = match user {
            Some(id) if !id.is_anonymous() => Requester::User(self.user(id)?.clone()),
            _ => Requester::Anonymous,
        };
        let mut ctx = AccessContext::new(requester);
        if let Some(ip) = remote_ip {
            ctx = ctx.with_remote_ip(ip);
        }
        if let Some(url) = request_url {
            ctx = ctx.with_request_url(url);
        }
        Ok(ctx)
    }
}

/// The signer for the configured secret. Without one, a throwaway key is
/// generated, so signed URLs stop verifying once the process exits.
pub fn signer_from_settings(settings: &Settings) -> Result<Arc<Ed25519UrlSigner>> {
    match settings.signing_secret()? {
        Some(secret) => Ok(Arc::new(Ed25519UrlSigner::from_secret(&secret))),
        None => {
            warn!("No signing secret configured, using an ephemeral key");
            Ok(Arc::new(Ed25519UrlSigner::generate()))
        }
    }
}

/// Signs `url` for `expires_in` seconds, or the configured default.
pub fn sign_url(
    settings: &Settings,
    signer: &dyn UrlSigner,
    url: &str,
    expires_in: Option<i64>,
) -> Result<String> {
    let expires_in = match expires_in {
        Some(secs) => Duration::try_seconds(secs)
            .ok_or_else(|| anyhow!("--expires-in {secs} is out of range"))?,
        None => settings.default_expiry(),
    };
    Ok(signer.sign(url, expires_in)?)
}

/// Runs the standard access chain for a download request.
pub fn check_access(
    settings: &Settings,
    signer: Arc<dyn UrlSigner>,
    fixture: &Fixture,
    pdf_id: &str,
    entry_id: EntryId,
    ctx: &AccessContext,
) -> AccessResult<Authorized> {
    let chain = AccessChain::standard(settings, signer, Arc::new(RuleEvaluator));
    let gate = AccessGate::new(fixture.store.clone(), fixture.store.clone(), chain);
    gate.authorize(pdf_id, entry_id, ctx)
}

/// Resolves the merge tags in `text` for one entry.
pub fn resolve_text(
    settings: &Settings,
    fixture: &Fixture,
    entry_id: EntryId,
    text: &str,
    options: ResolveOptions,
) -> Result<String> {
    let entry = fixture.store.entry(entry_id)?;
    let form = fixture.store.form(entry.form_id)?;
    let resolver = MergeTagResolver::new(PdfUrlBuilder::from_settings(settings), Arc::new(RuleEvaluator));
    info!(entry = %entry_id, form = %form.id, "resolving merge tags");
    Ok(resolver.resolve_with(text, &form, &entry, options))
}

/// Merge tags available on a form.
pub fn form_tags(fixture: &Fixture, form_id: FormId) -> Result<Vec<TagDescriptor>> {
    Ok(available_tags(&fixture.store.form(form_id)?))
}
