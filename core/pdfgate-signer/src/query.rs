//! Minimal query-string handling for signed URLs.
//!
//! Parameters are treated as opaque `name=value` pairs in their original
//! order; nothing is percent-decoded, so the signed bytes are exactly the
//! bytes the client sends back.

/// Query parameter carrying the expiry timestamp.
pub const EXPIRES_PARAM: &str = "expires";

/// Query parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// A URL split into the part before `?`, its parameters, and its fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitUrl<'a> {
    pub base: &'a str,
    pub params: Vec<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> SplitUrl<'a> {
    pub fn parse(url: &'a str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (url, None),
        };
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, query),
            None => (rest, ""),
        };
        let params = query.split('&').filter(|p| !p.is_empty()).collect();
        Self {
            base,
            params,
            fragment,
        }
    }

    /// Values of every occurrence of `name`.
    pub fn values(&self, name: &str) -> Vec<&'a str> {
        self.params
            .iter()
            .copied()
            .filter(|p| param_name(p) == name)
            .map(|p| p.split_once('=').map(|(_, v)| v).unwrap_or(""))
            .collect()
    }

    /// The URL with the signing parameters and fragment removed.
    pub fn unsigned(&self) -> String {
        let kept: Vec<&str> = self
            .params
            .iter()
            .copied()
            .filter(|p| !is_signing_param(p))
            .collect();
        if kept.is_empty() {
            self.base.to_string()
        } else {
            format!("{}?{}", self.base, kept.join("&"))
        }
    }
}

fn param_name(param: &str) -> &str {
    param.split_once('=').map(|(n, _)| n).unwrap_or(param)
}

fn is_signing_param(param: &str) -> bool {
    matches!(param_name(param), EXPIRES_PARAM | SIGNATURE_PARAM)
}

/// Returns true if `url` carries both signing parameters, valid or not.
#[must_use]
pub fn is_signed(url: &str) -> bool {
    let split = SplitUrl::parse(url);
    !split.values(EXPIRES_PARAM).is_empty() && !split.values(SIGNATURE_PARAM).is_empty()
}

/// A URL ending in the signing parameters the signer appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignedParts<'a> {
    /// Everything before the signing parameters, byte for byte.
    pub unsigned: &'a str,
    pub expires: i64,
    pub signature: &'a str,
}

impl<'a> SignedParts<'a> {
    /// Splits a signed URL into the signed prefix and its parameters.
    ///
    /// Returns `None` unless, ignoring any fragment, the URL is a canonical
    /// unsigned URL followed by exactly `expires=<n>&signature=<s>`: the form
    /// [`sign_at`](crate::UrlSigner::sign_at) produces. Empty segments,
    /// signing parameters anywhere else and non-canonical numbers all fail.
    pub fn parse(url: &'a str) -> Option<Self> {
        let url = url.split_once('#').map_or(url, |(rest, _)| rest);
        let (head, signature) = url.rsplit_once(&format!("&{SIGNATURE_PARAM}="))?;
        if signature.contains(['&', '?']) {
            return None;
        }

        let split_at = head.rfind(['?', '&'])?;
        let (unsigned, separator) = (&head[..split_at], head.as_bytes()[split_at]);
        let raw = head[split_at + 1..]
            .strip_prefix(EXPIRES_PARAM)?
            .strip_prefix('=')?;
        let expires: i64 = raw.parse().ok()?;
        if expires.to_string() != raw {
            return None;
        }

        let expected = if unsigned.contains('?') { b'&' } else { b'?' };
        if separator != expected || SplitUrl::parse(unsigned).unsigned() != unsigned {
            return None;
        }

        Some(Self {
            unsigned,
            expires,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_url() {
        let split = SplitUrl::parse("https://test.com");
        assert_eq!(split.base, "https://test.com");
        assert!(split.params.is_empty());
        assert_eq!(split.fragment, None);
        assert_eq!(split.unsigned(), "https://test.com");
    }

    #[test]
    fn split_keeps_param_order() {
        let split = SplitUrl::parse("https://test.com/?gpdf=1&pid=abc&lid=4#top");
        assert_eq!(split.params, vec!["gpdf=1", "pid=abc", "lid=4"]);
        assert_eq!(split.fragment, Some("top"));
    }

    #[test]
    fn unsigned_strips_signing_params_only() {
        let split =
            SplitUrl::parse("https://test.com/?gpdf=1&expires=10&pid=abc&signature=xyz#frag");
        assert_eq!(split.unsigned(), "https://test.com/?gpdf=1&pid=abc");
    }

    #[test]
    fn values_collects_duplicates() {
        let split = SplitUrl::parse("https://test.com/?expires=1&expires=2&flag");
        assert_eq!(split.values("expires"), vec!["1", "2"]);
        assert_eq!(split.values("flag"), vec![""]);
    }

    #[test]
    fn signed_parts_of_canonical_url() {
        let parts = SignedParts::parse("https://t.com/?a=1&expires=10&signature=xyz#top").unwrap();
        assert_eq!(parts.unsigned, "https://t.com/?a=1");
        assert_eq!(parts.expires, 10);
        assert_eq!(parts.signature, "xyz");

        let parts = SignedParts::parse("https://t.com?expires=10&signature=xyz").unwrap();
        assert_eq!(parts.unsigned, "https://t.com");
    }

    #[test]
    fn signed_parts_reject_non_canonical_urls() {
        for url in [
            "https://t.com/?a=1&&b=2&expires=10&signature=x",
            "https://t.com/?&a=1&expires=10&signature=x",
            "https://t.com/?a=1&expires=10&signature=x&",
            "https://t.com?&expires=10&signature=x",
            "https://t.com/?expires=10&a=1&signature=x",
            "https://t.com/?signature=x&expires=10",
            "https://t.com/?expires=1&expires=10&signature=x",
            "https://t.com/?a=1?expires=10&signature=x",
            "https://t.com&expires=10&signature=x",
            "https://t.com/?a=1&expires=+10&signature=x",
            "https://t.com/?a=1&expires=010&signature=x",
            "https://t.com/?a=1&expires=10",
        ] {
            assert!(SignedParts::parse(url).is_none(), "{url} should not parse");
        }
    }

    #[test]
    fn is_signed_needs_both_params() {
        assert!(is_signed("https://t.com/?expires=1&signature=a"));
        assert!(!is_signed("https://t.com/?expires=1"));
        assert!(!is_signed("https://t.com/?signature=a"));
        assert!(!is_signed("https://t.com/"));
    }
}
