//! Query-string half of the fragment: an ordered key/value mapping and its
//! `&`-joined wire form.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Bytes that are percent-encoded inside a query value.
///
/// Covers everything `encodeURI` escapes plus the three delimiters of the
/// fragment grammar (`#`, `&`, `=`) and `?`, so any value survives a
/// build/parse cycle.
const FRAGMENT_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode a query value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, FRAGMENT_VALUE).to_string()
}

/// Percent-decode a query value.
///
/// Escapes that do not form valid UTF-8 are replaced with U+FFFD rather than
/// rejected: fragments are untrusted input and reading them must not fail.
pub fn decode_value(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// One query pair. `raw` keeps the segment exactly as it was parsed so an
/// untouched pair is written back byte for byte.
#[derive(Clone, Debug)]
struct Entry {
    key: String,
    value: String,
    raw: Option<String>,
}

/// Insertion-ordered string mapping with map semantics.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first appearance. Pairs read by
/// [`parse_query_string`] remember their raw text and are emitted
/// unchanged until overwritten.
#[derive(Clone, Debug, Default)]
pub struct Query {
    pairs: Vec<Entry>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|e| e.key == key)
    }

    /// Insert or overwrite `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.insert_entry(key.into(), value.into(), None)
    }

    fn insert_entry(&mut self, key: String, value: String, raw: Option<String>) -> Option<String> {
        match self.pairs.iter_mut().find(|e| e.key == key) {
            Some(existing) => {
                existing.raw = raw;
                Some(std::mem::replace(&mut existing.value, value))
            }
            None => {
                self.pairs.push(Entry { key, value, raw });
                None
            }
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.pairs.iter().position(|e| e.key == key)?;
        Some(self.pairs.remove(idx).value)
    }

    /// Iterate over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|e| e.key.as_str())
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as `key=value&key=value` with percent-encoded values.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|e| match &e.raw {
                Some(raw) => raw.clone(),
                None => format!("{}={}", e.key, encode_value(&e.value)),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Equality looks at decoded content only, not at the raw spelling.
impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.pairs.len() == other.pairs.len()
            && self
                .pairs
                .iter()
                .zip(&other.pairs)
                .all(|(a, b)| a.key == b.key && a.value == b.value)
    }
}

impl Eq for Query {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.insert(k, v);
        }
        query
    }
}

impl IntoIterator for Query {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for e in &self.pairs {
            map.serialize_entry(&e.key, &e.value)?;
        }
        map.end()
    }
}

/// Parse a `key=value&key=value` string.
///
/// Pairs are split on the first `=`; a pair without `=` has an empty value.
/// Only values are percent-decoded. Empty segments (`a=1&&b=2`) are skipped.
/// When a key repeats, the last occurrence wins.
pub fn parse_query_string(query_string: &str) -> Query {
    let mut query = Query::new();
    if query_string.is_empty() {
        return query;
    }

    for pair in query_string.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        query.insert_entry(key.to_string(), decode_value(raw), Some(pair.to_string()));
    }
    query
}
