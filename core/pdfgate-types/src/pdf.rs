//! PDF configuration attached to a form.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::PdfId;
use crate::logic::ConditionalLogic;

/// A named document-generation configuration with its own access rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfConfig {
    pub id: PdfId,
    pub name: String,
    #[serde(default)]
    pub template: String,
    /// Inactive PDFs are never served and never linked.
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub active: bool,
    /// Anyone holding the link may view the PDF.
    #[serde(default, deserialize_with = "flag")]
    pub public_access: bool,
    /// Only users holding an admin capability may view the PDF; the entry
    /// owner loses access.
    #[serde(default, deserialize_with = "flag")]
    pub restrict_owner: bool,
    #[serde(
        default,
        rename = "conditionalLogic",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditional_logic: Option<ConditionalLogic>,
}

fn default_active() -> bool {
    true
}

impl PdfConfig {
    /// Creates an active, non-public configuration with no conditional logic.
    #[must_use]
    pub fn new(id: PdfId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            template: String::new(),
            active: true,
            public_access: false,
            restrict_owner: false,
            conditional_logic: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_public_access(mut self, public_access: bool) -> Self {
        self.public_access = public_access;
        self
    }

    #[must_use]
    pub fn with_restrict_owner(mut self, restrict_owner: bool) -> Self {
        self.restrict_owner = restrict_owner;
        self
    }

    #[must_use]
    pub fn with_conditional_logic(mut self, logic: ConditionalLogic) -> Self {
        self.conditional_logic = Some(logic);
        self
    }
}

/// Stored settings use either JSON booleans or the legacy `"Yes"`/`"No"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Ok(true),
            "no" | "false" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value: {other:?}"))),
        },
    }
}
