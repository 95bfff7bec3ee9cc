//! Whole-fragment parsing and building.

use serde::{Deserialize, Serialize};

use crate::query::{parse_query_string, Query};

/// A parsed URL fragment: an opaque path plus a decoded query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Everything between `#` and the first `?`, carried verbatim.
    pub path: String,
    /// Decoded query pairs.
    pub query: Query,
}

impl Fragment {
    /// Create a fragment from its parts.
    pub fn new(path: impl Into<String>, query: Query) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

}

/// Layout used when writing a fragment back out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentFormat {
    /// `#{path}?{query}`.
    #[default]
    PathQuery,
    /// `#{query}` with no path separator. Falls back to [`PathQuery`]
    /// whenever a path is present, so the path is never dropped.
    ///
    /// [`PathQuery`]: FragmentFormat::PathQuery
    BareQuery,
}

/// Parse a fragment string, with or without its leading `#`.
///
/// # Examples
///
/// ```
/// use fragstate_codec::parse_fragment;
///
/// let f = parse_fragment("#settings?theme=dark&lang=en");
/// assert_eq!(f.path, "settings");
/// assert_eq!(f.query.get("lang"), Some("en"));
///
/// // No `?` and no `=`: the whole thing is a path.
/// assert_eq!(parse_fragment("#/a/b").path, "/a/b");
///
/// // No `?` but an `=`: legacy bare query string.
/// let legacy = parse_fragment("#count=2");
/// assert_eq!(legacy.path, "");
/// assert_eq!(legacy.query.get("count"), Some("2"));
/// ```
pub fn parse_fragment(fragment: &str) -> Fragment {
    let rest = fragment.strip_prefix('#').unwrap_or(fragment);
    if rest.is_empty() {
        return Fragment::default();
    }

    match rest.split_once('?') {
        Some((path, query_string)) => Fragment::new(path, parse_query_string(query_string)),
        None if rest.contains('=') => Fragment::new("", parse_query_string(rest)),
        None => Fragment::new(rest, Query::new()),
    }
}

/// Build a fragment string (always starting with `#`).
///
/// With an empty query the `?` is omitted, except when the path itself
/// contains `=`; it is then kept so the path is not re-read as a bare query.
/// For the same reason a bare query with no `=` in it (only flags, such as
/// `#flag`) is written as `#?flag`.
pub fn build_fragment(fragment: &Fragment, format: FragmentFormat) -> String {
    let query_string = fragment.query.to_query_string();

    if format == FragmentFormat::BareQuery
        && fragment.path.is_empty()
        && (query_string.is_empty() || query_string.contains('='))
    {
        return format!("#{query_string}");
    }

    if query_string.is_empty() && !fragment.path.contains('=') {
        format!("#{}", fragment.path)
    } else {
        format!("#{}?{query_string}", fragment.path)
    }
}
