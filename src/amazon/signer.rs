//! Canonical query construction and HMAC-SHA256 request signing for the
//! Product Advertising API.
//!
//! The remote service recomputes the signature from the query it receives,
//! so the canonical form must match byte-for-byte: `key=value` pairs sorted
//! as whole strings in byte order, joined with `&`, and signed together with
//! the method, host and path.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

/// Fixed HTTP method token of the string-to-sign.
pub const METHOD: &str = "GET";

/// Request path of the Product Advertising API.
pub const API_PATH: &str = "/onca/xml";

pub const SERVICE: &str = "AWSECommerceService";
pub const API_VERSION: &str = "2011-08-01";

/// Query parameters of a signed request.
///
/// Values are percent-escaped on insertion, so canonicalization is a plain
/// join over what is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedRequestParams {
    params: BTreeMap<String, String>,
}

impl SignedRequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the base parameter set every API call carries.
    pub fn base(access_key: &str, associate_tag: &str, timestamp: DateTime<Utc>) -> Self {
        let mut params = Self::new();
        params.insert("Service", SERVICE);
        params.insert("Version", API_VERSION);
        params.insert("AssociateTag", associate_tag);
        params.insert("Timestamp", &format_timestamp(timestamp));
        params.insert("AWSAccessKeyId", access_key);
        params
    }

    /// Escapes `value` and stores it under `key`, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: &str) -> &mut Self {
        self.params.insert(key.to_string(), urlencoding::encode(value).into_owned());
        self
    }

    /// Returns the stored (escaped) value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Builds the canonical query string.
    pub fn canonical_query(&self) -> String {
        let mut pairs: Vec<String> =
            self.params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        // Sort the joined pairs, not the keys: "A-=1" must precede "A=1".
        pairs.sort_unstable();
        pairs.join("&")
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for SignedRequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k.as_ref(), v.as_ref());
        }
        params
    }
}

/// Formats a timestamp as ISO-8601 UTC with second precision (`2015-06-01T12:00:00Z`).
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Builds the newline-joined string-to-sign.
pub fn string_to_sign(host: &str, path: &str, canonical_query: &str) -> String {
    format!("{}\n{}\n{}\n{}", METHOD, host, path, canonical_query)
}

/// Signs the parameters, returning `(canonical_query, signature)`.
///
/// The signature is already URL-escaped; the final query string is
/// `{canonical_query}&Signature={signature}`.
pub fn sign(params: &SignedRequestParams, host: &str, path: &str, secret: &str) -> (String, String) {
    let canonical_query = params.canonical_query();
    let payload = string_to_sign(host, path, &canonical_query);
    let signature = hmac_sha256_escaped(secret.as_bytes(), payload.as_bytes());
    (canonical_query, signature)
}

fn hmac_sha256_escaped(secret: &[u8], payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload);
    let encoded = STANDARD.encode(mac.finalize().into_bytes());
    urlencoding::encode(&encoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const UK_HOST: &str = "ecs.amazonaws.co.uk";

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_string_to_sign_layout() {
        let params: SignedRequestParams = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(
            string_to_sign(UK_HOST, API_PATH, &params.canonical_query()),
            "GET\necs.amazonaws.co.uk\n/onca/xml\nA=1&B=2"
        );
    }

    #[test]
    fn test_signature_vector() {
        let params: SignedRequestParams = [("A", "1"), ("B", "2")].into_iter().collect();
        let (query, signature) = sign(&params, UK_HOST, API_PATH, "testsecret");
        assert_eq!(query, "A=1&B=2");
        assert_eq!(signature, "dy9cTdgzkz3TfQdRtR6CPHiNySenbZYgrRTbPtfJs64%3D");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let params = SignedRequestParams::base("AKID", "tag-21", fixed_time());
        let first = sign(&params, UK_HOST, API_PATH, "secret");
        let second = sign(&params, UK_HOST, API_PATH, "secret");
        assert_eq!(first, second);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward: SignedRequestParams =
            [("Operation", "ItemLookup"), ("ItemId", "0141439513"), ("Service", SERVICE)]
                .into_iter()
                .collect();
        let backward: SignedRequestParams =
            [("Service", SERVICE), ("ItemId", "0141439513"), ("Operation", "ItemLookup")]
                .into_iter()
                .collect();

        assert_eq!(
            sign(&forward, UK_HOST, API_PATH, "secret"),
            sign(&backward, UK_HOST, API_PATH, "secret")
        );
    }

    #[test]
    fn test_sort_is_over_joined_pairs() {
        // '-' sorts before '=', so "A-=2" precedes "A=1" even though "A" < "A-".
        let params: SignedRequestParams = [("A", "1"), ("A-", "2")].into_iter().collect();
        assert_eq!(params.canonical_query(), "A-=2&A=1");
    }

    #[test]
    fn test_sort_is_case_sensitive_byte_order() {
        let params: SignedRequestParams =
            [("b", "1"), ("B", "2"), ("AWSAccessKeyId", "x")].into_iter().collect();
        assert_eq!(params.canonical_query(), "AWSAccessKeyId=x&B=2&b=1");
    }

    #[test]
    fn test_values_are_escaped_on_insert() {
        let mut params = SignedRequestParams::new();
        params.insert("Keywords", "pride & prejudice");
        assert_eq!(params.get("Keywords"), Some("pride%20%26%20prejudice"));
    }

    #[test]
    fn test_base_params() {
        let params = SignedRequestParams::base("AKID", "tag-21", fixed_time());
        assert_eq!(params.len(), 5);
        assert_eq!(params.get("Service"), Some("AWSECommerceService"));
        assert_eq!(params.get("Version"), Some("2011-08-01"));
        assert_eq!(params.get("AssociateTag"), Some("tag-21"));
        assert_eq!(params.get("AWSAccessKeyId"), Some("AKID"));
        assert_eq!(params.get("Timestamp"), Some("2015-06-01T12%3A00%3A00Z"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(fixed_time()), "2015-06-01T12:00:00Z");
    }

    #[test]
    fn test_empty_params() {
        let params = SignedRequestParams::new();
        assert!(params.is_empty());
        let (query, signature) = sign(&params, UK_HOST, API_PATH, "secret");
        assert_eq!(query, "");
        assert!(!signature.is_empty());
    }
}
