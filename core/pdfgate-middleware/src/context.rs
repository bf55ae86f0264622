//! Per-request access context.

use chrono::{DateTime, Utc};
use pdfgate_types::{Requester, User};
use std::net::IpAddr;

/// Everything about the current request the checks may look at.
///
/// Built once per request by the host layer and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub requester: Requester,
    pub remote_ip: Option<IpAddr>,
    /// Full request URL including the query string.
    pub request_url: String,
    /// Evaluation time.
    pub now: DateTime<Utc>,
}

impl AccessContext {
    /// Creates a context for `requester` at the current time.
    #[must_use]
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            remote_ip: None,
            request_url: String::new(),
            now: Utc::now(),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Requester::Anonymous)
    }

    #[must_use]
    pub fn for_user(user: User) -> Self {
        Self::new(Requester::User(user))
    }

    #[must_use]
    pub fn with_remote_ip(mut self, ip: IpAddr) -> Self {
        self.remote_ip = Some(ip);
        self
    }

    #[must_use]
    pub fn with_request_url(mut self, url: impl Into<String>) -> Self {
        self.request_url = url.into();
        self
    }

    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.requester.user()
    }
}
