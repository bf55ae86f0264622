//! Shared fixtures for merge-tag tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use pdfgate_mergetags::{MergeTagResolver, PdfUrlBuilder};
use pdfgate_middleware::RuleEvaluator;
use pdfgate_types::{ConditionalLogic, Entry, EntryId, Form, FormId, Operator, PdfConfig, PdfId, Rule};
use std::sync::Arc;

pub const CONDITIONAL_FAILED: &str = "555ad84787d7e";
pub const ACTIVE: &str = "556690c67856b";
pub const NOT_ACTIVE: &str = "556690c8d7f82";

pub const ENCODED_URL: &str = "http://example.org/?gpdf=1&#038;pid=556690c67856b&#038;lid=1";
pub const RAW_URL: &str = "http://example.org/?gpdf=1&pid=556690c67856b&lid=1";

fn id(s: &str) -> PdfId {
    PdfId::parse(s).unwrap()
}

pub fn form() -> Form {
    Form::new(FormId(1), "All form fields")
        .with_pdf(
            PdfConfig::new(id(CONDITIONAL_FAILED), "My First PDF Template").with_conditional_logic(
                ConditionalLogic::show_all(vec![Rule::new("1", Operator::Is, "Not the value")]),
            ),
        )
        .with_pdf(PdfConfig::new(id(ACTIVE), "My First PDF Template (copy)"))
        .with_pdf(PdfConfig::new(id(NOT_ACTIVE), "Not Active").with_active(false))
}

pub fn entry() -> Entry {
    Entry::new(
        EntryId(1),
        FormId(1),
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    )
    .with_field("1", "My Single Line Response")
}

pub fn resolver() -> MergeTagResolver {
    MergeTagResolver::new(PdfUrlBuilder::new("http://example.org"), Arc::new(RuleEvaluator))
}
