//! URL canonicalization.
//!
//! Reduces a URL to a stable comparison key: `host[:port] + path` plus the
//! sorted, tracking-free query. The scheme and fragment never take part in
//! comparison.

use percent_encoding::percent_decode_str;
use url::Url;

/// Query parameter names stripped before comparison (exact matches).
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "gclsrc", "ref", "ref_src", "mc_cid", "mc_eid", "igshid", "spm",
];

/// Query parameter name prefix stripped before comparison.
const TRACKING_PREFIX: &str = "utm_";

/// Whether a query parameter name is a known tracking parameter.
pub fn is_tracking_param(name: &str) -> bool {
    name.starts_with(TRACKING_PREFIX) || TRACKING_PARAMS.contains(&name)
}

/// Canonicalize a URL token into a comparison key.
///
/// Returns `None` when the token does not parse as a URL with a host, in
/// which case the caller falls back to plain token normalization.
pub fn canonicalize_url(token: &str, strip_tracking: bool, extra_tracking: &[String]) -> Option<String> {
    let parsed = Url::parse(token).ok()?;

    let host = parsed.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let mut path = percent_decode_str(parsed.path())
        .decode_utf8_lossy()
        .into_owned();
    // Trailing slash is noise, but the root path must stay "/"
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if strip_tracking {
        pairs.retain(|(k, _)| !is_tracking_param(k) && !extra_tracking.iter().any(|e| e == k));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut key = String::from(host);
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }
    key.push_str(&path);
    if !pairs.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        key.push('?');
        key.push_str(&query);
    }

    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(token: &str) -> Option<String> {
        canonicalize_url(token, true, &[])
    }

    #[test]
    fn test_scheme_dropped_host_lowercased() {
        assert_eq!(canon("https://Example.COM/Path"), Some("example.com/Path".into()));
        assert_eq!(canon("http://example.com/Path"), Some("example.com/Path".into()));
    }

    #[test]
    fn test_www_stripped() {
        assert_eq!(canon("https://www.x.com/p"), canon("https://x.com/p"));
    }

    #[test]
    fn test_trailing_slash_stripped_but_root_kept() {
        assert_eq!(canon("https://x.com/p/"), canon("https://x.com/p"));
        assert_eq!(canon("https://x.com/"), Some("x.com/".into()));
        assert_eq!(canon("https://x.com"), Some("x.com/".into()));
    }

    #[test]
    fn test_fragment_dropped() {
        assert_eq!(canon("https://x.com/p#section"), canon("https://x.com/p"));
    }

    #[test]
    fn test_path_percent_decoded() {
        assert_eq!(canon("https://x.com/a%2Fb"), Some("x.com/a/b".into()));
    }

    #[test]
    fn test_tracking_params_stripped() {
        assert_eq!(
            canon("https://x.com/p?utm_source=tw&utm_medium=social&fbclid=abc"),
            Some("x.com/p".into())
        );
    }

    #[test]
    fn test_non_tracking_params_kept_and_sorted() {
        assert_eq!(
            canon("https://x.com/search?q=rust&page=2"),
            Some("x.com/search?page=2&q=rust".into())
        );
    }

    #[test]
    fn test_tracking_kept_when_stripping_off() {
        assert_eq!(
            canonicalize_url("https://x.com/p?utm_source=tw", false, &[]),
            Some("x.com/p?utm_source=tw".into())
        );
    }

    #[test]
    fn test_extra_tracking_params() {
        let extra = vec!["session_id".to_string()];
        assert_eq!(
            canonicalize_url("https://x.com/p?session_id=42&q=1", true, &extra),
            Some("x.com/p?q=1".into())
        );
    }

    #[test]
    fn test_explicit_port_kept() {
        assert_eq!(canon("https://x.com:8443/p"), Some("x.com:8443/p".into()));
        assert_eq!(canon("https://x.com:443/p"), Some("x.com/p".into()));
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(canon("just-a-token"), None);
    }

    #[test]
    fn test_is_tracking_param() {
        assert!(is_tracking_param("utm_source"));
        assert!(is_tracking_param("utm_anything"));
        assert!(is_tracking_param("gclid"));
        assert!(!is_tracking_param("q"));
        assert!(!is_tracking_param("refresh"));
    }
}
