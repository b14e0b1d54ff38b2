//! Path slash collapsing.

use url::Url;

/// Replace every run of `/` in the path with a single `/`.
///
/// URLs without a hierarchical path (`mailto:`, `data:`) are left alone.
pub(super) fn collapse_slashes(url: &mut Url) {
    if url.cannot_be_a_base() || !url.path().contains("//") {
        return;
    }
    let collapsed = collapse(url.path());
    url.set_path(&collapsed);
}

fn collapse(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        let is_slash = ch == '/';
        if is_slash && prev_slash {
            continue;
        }
        prev_slash = is_slash;
        out.push(ch);
    }
    out
}
