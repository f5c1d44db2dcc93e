//! Captured path parameters and match results.

use serde::Serialize;

/// Parameters captured while matching a path, in the order their tokens
/// appear in the path (left to right), not registration order.
///
/// Both names and values borrow: names from the router, values from the
/// looked-up path. The list grows as needed; there is no fixed capture
/// capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Params<'a> {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Gets a captured value by name.
    ///
    /// When the same name was captured more than once, the leftmost capture
    /// wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Parses a captured value as a specific type.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, name: &'a str, value: &'a str) {
        self.entries.push((name, value));
    }

    /// Discards captures recorded past `len`. Used when lookup re-enters a
    /// previously passed wildcard branch.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

impl<'a, 'p> IntoIterator for &'p Params<'a> {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Copied<std::slice::Iter<'p, (&'a str, &'a str)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

/// A matched route: the registered handler plus the captures that matched.
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    /// The handler registered for the matched pattern.
    pub handler: &'a T,
    /// Parameters extracted from the path.
    pub params: Params<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_order_and_lookup() {
        let mut params = Params::new();
        params.push("id", "42");
        params.push("file", "css/app.css");

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("file"), Some("css/app.css"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.parse::<i64>("id"), Some(42));

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("id", "42"), ("file", "css/app.css")]);
    }

    #[test]
    fn test_leftmost_capture_wins() {
        let mut params = Params::new();
        params.push("n", "first");
        params.push("n", "second");
        assert_eq!(params.get("n"), Some("first"));
    }

    #[test]
    fn test_truncate_discards_later_captures() {
        let mut params = Params::new();
        params.push("a", "1");
        params.push("b", "2");
        params.truncate(1);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("b"), None);
    }
}
