//! URL canonicalization for "same resource" comparison.
//!
//! The canonical form only exists to be compared byte-for-byte against another
//! canonical form. It is never stored, displayed, or handed to a history store.
//!
//! Input that does not parse as an absolute URL is returned verbatim, so two
//! unparseable strings match only when they are identical.

mod path;
mod query;
mod rules;

pub use rules::TrackingRules;

use std::sync::OnceLock;
use url::Url;

/// Canonicalizes raw URL strings using a set of tracking rules.
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    rules: TrackingRules,
}

impl Canonicalizer {
    pub fn new(rules: TrackingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TrackingRules {
        &self.rules
    }

    /// Canonical form of `raw`.
    ///
    /// - scheme and host lowercased (path, query and fragment keep their case)
    /// - `:80` on http and `:443` on https removed
    /// - tracking parameters removed, survivors ordered by name
    /// - runs of `/` in the path collapsed
    /// - fragment passed through
    pub fn canonicalize(&self, raw: &str) -> String {
        match Url::parse(raw) {
            Ok(url) => self.canonicalize_url(url),
            Err(e) => {
                tracing::trace!(raw, error = %e, "not a structured URL; comparing verbatim");
                raw.to_string()
            }
        }
    }

    /// Whether `a` and `b` denote the same resource.
    pub fn same_resource(&self, a: &str, b: &str) -> bool {
        a == b || self.canonicalize(a) == self.canonicalize(b)
    }

    fn canonicalize_url(&self, mut url: Url) -> String {
        fold_host_case(&mut url);
        elide_default_port(&mut url);
        query::rewrite(&mut url, &self.rules);
        path::collapse_slashes(&mut url);
        url.into()
    }
}

/// Canonicalize with the default tracking rules.
pub fn canonicalize(raw: &str) -> String {
    default_canonicalizer().canonicalize(raw)
}

/// [`Canonicalizer::same_resource`] with the default tracking rules.
pub fn same_resource(a: &str, b: &str) -> bool {
    default_canonicalizer().same_resource(a, b)
}

fn default_canonicalizer() -> &'static Canonicalizer {
    static DEFAULT: OnceLock<Canonicalizer> = OnceLock::new();
    DEFAULT.get_or_init(Canonicalizer::default)
}

/// The parser already lowercases the scheme and special-scheme hosts; opaque
/// hosts (`foo://Host/`) are kept as written and need folding here.
fn fold_host_case(url: &mut Url) {
    let lowered = url
        .host_str()
        .filter(|h| h.bytes().any(|b| b.is_ascii_uppercase()))
        .map(str::to_ascii_lowercase);
    if let Some(host) = lowered {
        if url.set_host(Some(&host)).is_err() {
            tracing::trace!(host = %host, "could not lowercase host");
        }
    }
}

fn elide_default_port(url: &mut Url) {
    let is_default = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default {
        // Only fails for URLs that cannot carry a port, which have none to drop.
        let _ = url.set_port(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_and_host_case_folded() {
        assert_eq!(canonicalize("HTTP://Example.com/x"), "http://example.com/x");
        assert_eq!(
            canonicalize("HTTP://Example.com/x"),
            canonicalize("http://example.com/x")
        );
    }

    #[test]
    fn path_query_fragment_case_preserved() {
        assert_eq!(
            canonicalize("https://EXAMPLE.com/Path?Q=V#Frag"),
            "https://example.com/Path?Q=V#Frag"
        );
    }

    #[test]
    fn default_ports_elided() {
        assert_eq!(canonicalize("http://x.com:80/p"), canonicalize("http://x.com/p"));
        assert_eq!(canonicalize("https://x.com:443/p"), canonicalize("https://x.com/p"));
        assert_eq!(canonicalize("http://x.com:8080/p"), "http://x.com:8080/p");
        // Cross-over ports are not defaults.
        assert_eq!(canonicalize("http://x.com:443/p"), "http://x.com:443/p");
    }

    #[test]
    fn tracking_params_stripped() {
        assert_eq!(
            canonicalize("http://x.com/?utm_source=a&id=1"),
            canonicalize("http://x.com/?id=1")
        );
        assert_eq!(canonicalize("http://x.com/?utm_source=a"), "http://x.com/");
        assert_eq!(
            canonicalize("http://x.com/a?FBCLID=z&Mc_Eid=1&keep=2"),
            "http://x.com/a?keep=2"
        );
    }

    #[test]
    fn surviving_params_order_independent() {
        assert_eq!(
            canonicalize("http://x.com/?b=2&a=1"),
            canonicalize("http://x.com/?a=1&b=2")
        );
        assert_eq!(canonicalize("http://x.com/?b=2&a=1"), "http://x.com/?a=1&b=2");
    }

    #[test]
    fn slashes_collapsed() {
        assert_eq!(canonicalize("http://x.com//a///b"), canonicalize("http://x.com/a/b"));
        assert_eq!(canonicalize("http://x.com/"), "http://x.com/");
        assert_eq!(canonicalize("http://x.com"), "http://x.com/");
    }

    #[test]
    fn fragment_untouched() {
        assert_eq!(
            canonicalize("http://x.com/p?b=1&a=2&utm_medium=m#b=1&a=2"),
            "http://x.com/p?a=2&b=1#b=1&a=2"
        );
        assert_ne!(canonicalize("http://x.com/p#one"), canonicalize("http://x.com/p#two"));
    }

    #[test]
    fn malformed_input_returned_verbatim() {
        assert_eq!(canonicalize("not a url"), "not a url");
        assert_eq!(canonicalize("example.com/Path"), "example.com/Path");
        assert_eq!(canonicalize("http://exa mple.com/"), "http://exa mple.com/");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn malformed_inputs_only_match_exactly() {
        assert!(same_resource("not a url", "not a url"));
        assert!(!same_resource("not a url", "not  a url"));
    }

    #[test]
    fn opaque_host_lowercased() {
        assert_eq!(canonicalize("foo://HOST.Example/x"), "foo://host.example/x");
    }

    #[test]
    fn non_hierarchical_urls_pass_through() {
        assert_eq!(canonicalize("mailto:Someone@Example.com"), "mailto:Someone@Example.com");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let inputs = [
            "HTTP://Example.com:80//a///b/?utm_source=x&b=2&a=1&a=0#Top",
            "https://x.com:443/?q=hello+world&r=a%2Fb",
            "https://x.com/search?q=%E2%9C%93&x",
            "http://x.com:8080/p",
            "foo://HOST/x//y",
            "file:///tmp//a",
            "not a url",
        ];
        for u in inputs {
            let once = canonicalize(u);
            assert_eq!(canonicalize(&once), once, "not idempotent for {u}");
        }
    }

    #[test]
    fn custom_rules_apply() {
        let c = Canonicalizer::new(TrackingRules::empty().with_exact("sid"));
        assert_eq!(c.canonicalize("http://x.com/?sid=1&utm_source=a"), "http://x.com/?utm_source=a");
        assert!(c.same_resource("http://x.com/?sid=1", "http://X.com:80/"));
    }
}
