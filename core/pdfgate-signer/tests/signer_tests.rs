use chrono::{Duration, Utc};
use pdfgate_signer::{is_signed, Ed25519UrlSigner, SignerError, UrlSigner};
use proptest::prelude::*;

fn signer() -> Ed25519UrlSigner {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    Ed25519UrlSigner::from_secret(&seed)
}

// ── Sign / verify ────────────────────────────────────────────────

#[test]
fn sign_and_verify() {
    let signer = signer();
    let url = "https://test.com";

    let signed = signer.sign(url, Duration::days(1)).unwrap();
    assert_ne!(signed, url);
    assert!(signer.verify(&signed));
    assert!(!signer.verify(url));
}

#[test]
fn signed_download_link_verifies() {
    let signer = signer();
    let url = "http://example.org/?gpdf=1&pid=556690c67856b&lid=1&action=download";
    let signed = signer.sign(url, Duration::hours(1)).unwrap();
    assert!(is_signed(&signed));
    assert!(signer.verify(&signed));
}

#[test]
fn non_positive_expiry_rejected() {
    let err = signer().sign("https://test.com", Duration::zero()).unwrap_err();
    assert!(matches!(err, SignerError::InvalidExpiry(0)));
    assert!(signer().sign("https://test.com", Duration::seconds(-5)).is_err());
}

#[test]
fn expired_url_fails() {
    let signer = signer();
    let now = Utc::now();
    let signed = signer.sign_at("https://test.com", now - Duration::seconds(1));
    assert!(!signer.verify_at(&signed, now));
}

#[test]
fn url_valid_until_expiry_second() {
    let signer = signer();
    let now = Utc::now();
    let expires_at = now + Duration::seconds(60);
    let signed = signer.sign_at("https://test.com", expires_at);
    assert!(signer.verify_at(&signed, expires_at));
    assert!(!signer.verify_at(&signed, expires_at + Duration::seconds(1)));
}

#[test]
fn other_secret_fails() {
    let signed = signer().sign("https://test.com", Duration::hours(1)).unwrap();
    let other = Ed25519UrlSigner::from_secret(&[9u8; 32]);
    assert!(!other.verify(&signed));
}

#[test]
fn extended_expiry_fails() {
    let signer = signer();
    let now = Utc::now();
    let signed = signer.sign_at("https://test.com", now + Duration::hours(1));
    let expires = (now + Duration::hours(1)).timestamp();
    let tampered = signed.replace(
        &format!("expires={expires}"),
        &format!("expires={}", expires + 3600),
    );
    assert!(!signer.verify_at(&tampered, now));
}

#[test]
fn duplicate_expiry_fails() {
    let signer = signer();
    let signed = signer.sign("https://test.com", Duration::hours(1)).unwrap();
    let smuggled = format!("{signed}&expires=9999999999");
    assert!(!signer.verify(&smuggled));
}

#[test]
fn fragment_is_not_signed() {
    let signer = signer();
    let signed = signer.sign("https://test.com/pdf#page=2", Duration::hours(1)).unwrap();
    let without_fragment = signed.split('#').next().unwrap();
    assert!(signer.verify(without_fragment));
}

#[test]
fn garbage_signature_fails() {
    let signer = signer();
    let expires = (Utc::now() + Duration::hours(1)).timestamp();
    for sig in ["", "%%%", "AAAA", "not-base64!"] {
        let url = format!("https://test.com?expires={expires}&signature={sig}");
        assert!(!signer.verify(&url), "{sig:?} should fail");
    }
}

#[test]
fn expiry_beyond_date_range_rejected() {
    let err = signer().sign("https://test.com", Duration::MAX).unwrap_err();
    assert!(matches!(err, SignerError::InvalidExpiry(_)));
}

#[test]
fn reshaped_query_fails() {
    let signer = signer();
    let now = Utc::now();
    let signed = signer.sign_at("https://test.com/?gpdf=1&pid=abc&lid=1", now + Duration::hours(1));
    assert!(signer.verify_at(&signed, now));

    let mutations = [
        signed.replacen("gpdf=1&pid", "gpdf=1&&pid", 1),
        signed.replacen("?gpdf=1", "?&gpdf=1", 1),
        format!("{signed}&"),
        format!("{signed}&x=1"),
    ];
    for mutated in mutations {
        assert_ne!(mutated, signed);
        assert!(!signer.verify_at(&mutated, now), "{mutated} should not verify");
    }
}

#[test]
fn empty_query_added_to_bare_url_fails() {
    let signer = signer();
    let now = Utc::now();
    let signed = signer.sign_at("https://test.com", now + Duration::hours(1));
    let mutated = signed.replacen("?expires=", "?&expires=", 1);
    assert_ne!(mutated, signed);
    assert!(!signer.verify_at(&mutated, now));
}

#[test]
fn signing_params_must_come_last() {
    let signer = signer();
    let now = Utc::now();
    let signed = signer.sign_at("https://test.com/?a=1", now + Duration::hours(1));
    let (unsigned, params) = signed.split_once("&expires=").unwrap();
    let moved = format!("https://test.com/?expires={params}&a=1");
    assert!(!signer.verify_at(&moved, now));
    assert!(!signer.verify_at(&format!("{unsigned}&b=2&expires={params}"), now));
}

#[test]
fn non_numeric_expiry_fails() {
    assert!(!signer().verify("https://test.com?expires=tomorrow&signature=abc"));
}

// ── Properties ───────────────────────────────────────────────────

fn path_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9/]{0,20}").unwrap()
}

proptest! {
    #[test]
    fn signed_urls_verify(path in path_strategy(), lid in 1u64..100_000, secs in 1i64..1_000_000) {
        let signer = signer();
        let url = format!("https://example.org/{path}?gpdf=1&pid=abc123&lid={lid}");
        let signed = signer.sign(&url, Duration::seconds(secs)).unwrap();
        prop_assert!(signer.verify(&signed));
    }

    #[test]
    fn mutated_base_fails(path in path_strategy(), extra in "[a-z0-9]{1,5}") {
        let signer = signer();
        let url = format!("https://example.org/{path}?gpdf=1&pid=abc123&lid=1");
        let signed = signer.sign(&url, Duration::hours(1)).unwrap();
        let mutated = signed.replacen("lid=1", &format!("lid=1{extra}"), 1);
        prop_assert!(!signer.verify(&mutated));
    }

    #[test]
    fn inserted_empty_segment_fails(lid in 1u64..100_000, at in 0usize..3) {
        let signer = signer();
        let now = Utc::now();
        let signed = signer.sign_at(
            &format!("https://example.org/?gpdf=1&pid=abc123&lid={lid}"),
            now + Duration::hours(1),
        );
        let separators: Vec<usize> = signed.match_indices('&').map(|(i, _)| i).collect();
        let i = separators[at];
        let mutated = format!("{}&{}", &signed[..i], &signed[i..]);
        prop_assert!(!signer.verify_at(&mutated, now));
    }

    #[test]
    fn mutated_signature_fails(index in 0usize..86, replacement in "[A-Za-z0-9_-]") {
        let signer = signer();
        let signed = signer.sign("https://example.org/?gpdf=1&pid=abc123&lid=1", Duration::hours(1)).unwrap();
        let (head, sig) = signed.split_once("signature=").unwrap();
        let mut chars: Vec<char> = sig.chars().collect();
        let i = index % chars.len();
        let new_char = replacement.chars().next().unwrap();
        prop_assume!(chars[i] != new_char);
        chars[i] = new_char;
        let mutated = format!("{head}signature={}", chars.into_iter().collect::<String>());
        prop_assert!(!signer.verify(&mutated));
    }
}
