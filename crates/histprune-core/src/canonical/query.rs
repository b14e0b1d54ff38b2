//! Query rewriting: drop tracking parameters, then order survivors by name.

use url::Url;

use super::rules::TrackingRules;

/// Rewrite the query in place.
///
/// Survivors are sorted by decoded name with a stable sort, so repeated names
/// keep the relative order of their values. The result is re-serialized as
/// `application/x-www-form-urlencoded`; an empty result drops the `?`.
pub(super) fn rewrite(url: &mut Url, rules: &TrackingRules) {
    if url.query().is_none() {
        return;
    }

    let mut kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !rules.is_tracking(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
        return;
    }

    kept.sort_by(|a, b| a.0.cmp(&b.0));
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}
