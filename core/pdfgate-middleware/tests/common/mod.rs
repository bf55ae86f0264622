//! Shared fixtures for middleware tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pdfgate_middleware::{AccessChain, AccessContext, RuleEvaluator};
use pdfgate_settings::Settings;
use pdfgate_signer::{Ed25519UrlSigner, UrlSigner};
use pdfgate_types::{Entry, EntryId, Form, FormId, PdfConfig, PdfId, User, UserId};
use std::net::IpAddr;
use std::sync::Arc;

pub const ADMIN_CAP: &str = "gravityforms_view_entries";
pub const PDF_ID: &str = "556690c67856b";
pub const ENTRY_IP: &str = "10.0.0.1";

/// Fixed evaluation time so timeout arithmetic is exact.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn signer() -> Arc<Ed25519UrlSigner> {
    Arc::new(Ed25519UrlSigner::from_secret(&[42u8; 32]))
}

pub fn chain_with(settings: &Settings) -> AccessChain {
    AccessChain::standard(settings, signer(), Arc::new(RuleEvaluator))
}

pub fn chain() -> AccessChain {
    chain_with(&Settings::default())
}

pub fn pdf() -> PdfConfig {
    PdfConfig::new(PdfId::parse(PDF_ID).unwrap(), "My First PDF Template")
}

/// Anonymous entry submitted five minutes ago from `ENTRY_IP`.
pub fn entry() -> Entry {
    Entry::new(EntryId(1), FormId(1), now() - Duration::minutes(5))
        .with_ip(ip(ENTRY_IP))
        .with_field("1", "")
}

pub fn owned_entry(owner: u64) -> Entry {
    entry().with_owner(UserId(owner))
}

pub fn form() -> Form {
    Form::new(FormId(1), "Standard").with_pdf(pdf())
}

pub fn subscriber(id: u64) -> User {
    User::new(UserId(id)).with_capability("read")
}

pub fn admin(id: u64) -> User {
    User::new(UserId(id)).with_capability(ADMIN_CAP)
}

pub fn anonymous_from(addr: &str) -> AccessContext {
    AccessContext::anonymous().with_remote_ip(ip(addr)).at(now())
}

pub fn logged_in(user: User) -> AccessContext {
    AccessContext::for_user(user).with_remote_ip(ip("192.168.1.50")).at(now())
}

pub fn download_url(entry: &Entry) -> String {
    format!("http://example.org/?gpdf=1&pid={PDF_ID}&lid={}", entry.id)
}

pub fn signed_url(entry: &Entry, expires_at: DateTime<Utc>) -> String {
    signer().sign_at(&download_url(entry), expires_at)
}
