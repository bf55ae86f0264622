//! Merge-tag grammar.

use pdfgate_types::{Form, PdfId};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `{label:pdf:id}`, optionally followed by one line break.
///
/// Group 1 is the label, group 2 the PDF id, group 3 the trailing break.
pub(crate) static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^{}]*?):pdf:([A-Za-z0-9]+)\}((?i:<br\s*/?>)|\r?\n)?")
        .expect("merge tag pattern is valid")
});

/// A PDF reference parsed out of text. The label is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeTag {
    pub label: String,
    pub pdf_id: PdfId,
}

impl MergeTag {
    /// Renders the tag back into its `{label:pdf:id}` form.
    #[must_use]
    pub fn to_tag(&self) -> String {
        format!("{{{}:pdf:{}}}", self.label, self.pdf_id)
    }
}

/// Returns every complete tag in `text`, left to right.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<MergeTag> {
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let label = caps.get(1)?.as_str().to_string();
            let pdf_id = PdfId::parse(caps.get(2)?.as_str()).ok()?;
            Some(MergeTag { label, pdf_id })
        })
        .collect()
}

/// A merge tag offered to form editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub label: String,
    pub tag: String,
}

/// Lists one merge tag per PDF configured on `form`, in form order.
#[must_use]
pub fn available_tags(form: &Form) -> Vec<TagDescriptor> {
    form.pdfs
        .iter()
        .map(|pdf| {
            // Braces in the name would end the tag early.
            let name: String = pdf.name.chars().filter(|c| !matches!(c, '{' | '}')).collect();
            TagDescriptor {
                label: format!("PDF: {name}"),
                tag: MergeTag {
                    label: name,
                    pdf_id: pdf.id.clone(),
                }
                .to_tag(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_and_id() {
        let tags = parse_tags("Hi {My First PDF Template (Copy):pdf:556690c67856b} there");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].label, "My First PDF Template (Copy)");
        assert_eq!(tags[0].pdf_id.as_str(), "556690c67856b");
    }

    #[test]
    fn empty_label() {
        let tags = parse_tags("{:pdf:abc}");
        assert_eq!(tags[0].label, "");
    }

    #[test]
    fn label_may_contain_colons() {
        let tags = parse_tags("{Invoice: 2024:pdf:abc}");
        assert_eq!(tags[0].label, "Invoice: 2024");
    }

    #[test]
    fn malformed_tags_ignored() {
        for text in [
            ":pdf:556690c67856b}",
            "{:pdf:556690c67856b",
            ":pdf:556690c67856b",
            "{label:pdf:}",
            "{label:pdf:abc-123}",
            "{label:PDF:abc}",
            "{label:doc:abc}",
        ] {
            assert!(parse_tags(text).is_empty(), "{text:?} should not parse");
        }
    }

    #[test]
    fn multiple_tags_in_order() {
        let tags = parse_tags("{a:pdf:one}{b:pdf:two}\n{c:pdf:three}");
        let ids: Vec<&str> = tags.iter().map(|t| t.pdf_id.as_str()).collect();
        assert_eq!(ids, vec!["one", "two", "three"]);
    }

    #[test]
    fn to_tag_roundtrip() {
        let tags = parse_tags("{Invoice:pdf:abc123}");
        assert_eq!(tags[0].to_tag(), "{Invoice:pdf:abc123}");
    }
}
