use summary_cache::document::{Document, Fingerprint};

const SHA256_A: &str = "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb";
const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

#[test]
fn golden_fingerprint_is_plain_sha256_hex() {
    assert_eq!(Fingerprint::of_str("a").as_str(), SHA256_A);
    assert_eq!(Fingerprint::of(b"a"), Fingerprint::of_str("a"));
}

#[test]
fn invariant_empty_input_has_a_fingerprint() {
    let fp = Fingerprint::of(&[]);
    assert_eq!(fp.as_str(), SHA256_EMPTY);
    assert_eq!(fp.as_str().len(), 64);
}

#[test]
fn invariant_same_content_same_fingerprint() {
    let doc1 = Document::new("posts/a/", "Hello world", true);
    let doc2 = Document::new("posts/b/", "Hello world", true);

    assert_eq!(doc1.content_fingerprint(), doc2.content_fingerprint());
    assert_ne!(doc1.identity_fingerprint(), doc2.identity_fingerprint());
}

#[test]
fn invariant_no_newline_normalization() {
    let unix = Fingerprint::of_str("line\n");
    let windows = Fingerprint::of_str("line\r\n");

    assert_ne!(unix, windows);
}

#[test]
fn invariant_eligibility_does_not_affect_fingerprints() {
    let published = Document::new("posts/a/", "body", true);
    let draft = Document::new("posts/a/", "body", false);

    assert_eq!(published.identity_fingerprint(), draft.identity_fingerprint());
    assert_eq!(published.content_fingerprint(), draft.content_fingerprint());
}

#[test]
fn document_summarizable_filter() {
    assert!(Document::new("posts/a/", "body", true).is_summarizable());
    assert!(!Document::new("posts/a/", "body", false).is_summarizable());
    assert!(!Document::new("posts/a/", "", true).is_summarizable());
    assert!(!Document::new("", "body", true).is_summarizable());
}

#[test]
fn fingerprint_serializes_as_bare_string() {
    let fp = Fingerprint::of_str("a");
    let json = serde_json::to_string(&fp).unwrap();
    assert_eq!(json, format!("\"{SHA256_A}\""));

    let back: Fingerprint = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fp);
    assert_eq!(back.to_string(), SHA256_A);
}
