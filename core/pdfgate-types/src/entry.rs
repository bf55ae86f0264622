//! Form entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::ids::{EntryId, FormId, UserId};

/// One form submission. Read-only for the purposes of access decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub form_id: FormId,
    /// The submitting user, if they were logged in.
    #[serde(default, deserialize_with = "owner")]
    pub created_by: Option<UserId>,
    /// The submitter's address, if recorded.
    #[serde(default, deserialize_with = "ip")]
    pub ip: Option<IpAddr>,
    pub date_created: DateTime<Utc>,
    /// Submitted values keyed by field id.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    /// Creates an anonymous entry with no recorded IP and no field values.
    #[must_use]
    pub fn new(id: EntryId, form_id: FormId, date_created: DateTime<Utc>) -> Self {
        Self {
            id,
            form_id,
            created_by: None,
            ip: None,
            date_created,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, user: UserId) -> Self {
        self.created_by = (!user.is_anonymous()).then_some(user);
        self
    }

    #[must_use]
    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = Some(ip);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field_id.into(), value.into());
        self
    }

    /// Returns the submitted value for a field, or `""` when absent.
    #[must_use]
    pub fn field_value(&self, field_id: &str) -> &str {
        self.fields.get(field_id).map(String::as_str).unwrap_or("")
    }

    /// Returns true if `user` submitted this entry.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.created_by == Some(user)
    }
}

// `created_by` is stored as 0 or null for anonymous submissions.
fn owner<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<UserId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_anonymous()))
}

// An empty string means no address was recorded.
fn ip<'de, D>(deserializer: D) -> Result<Option<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid ip {s:?}: {e}"))),
    }
}
