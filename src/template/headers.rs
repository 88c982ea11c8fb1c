//! Response header multimap.
//!
//! HTTP allows a header name to appear more than once, and the order of
//! entries can be meaningful (`Set-Cookie`, `Via`). [`Headers`] keeps every
//! entry the transport returned, in the order it returned them, instead of
//! collapsing values into a map.

use std::fmt;

/// An ordered multimap of header names to values.
///
/// Duplicate names are preserved as separate entries in insertion order.
/// Name lookups are ASCII case-insensitive; the stored casing is whatever
/// the transport provided.
///
/// # Example
///
/// ```rust
/// use http_template::Headers;
///
/// let mut headers = Headers::new();
/// headers.append("Via", "proxy-a");
/// headers.append("Via", "proxy-b");
///
/// assert_eq!(headers.get("via"), Some("proxy-a"));
/// assert_eq!(headers.get_all("Via").collect::<Vec<_>>(), ["proxy-a", "proxy-b"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry, keeping any existing entries with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the first value for the given name, compared ASCII
    /// case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value for the given name, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over all `(name, value)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the total number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts a transport header map into an ordered multimap.
    ///
    /// Values that are not valid UTF-8 are replaced with an empty string,
    /// matching how the transport exposes opaque header bytes.
    pub(crate) fn from_header_map(map: &reqwest::header::HeaderMap) -> Self {
        let mut headers = Self::new();
        for (name, value) in map {
            headers.append(name.as_str(), value.to_str().unwrap_or_default());
        }
        headers
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
            first = false;
        }
        Ok(())
    }
}
