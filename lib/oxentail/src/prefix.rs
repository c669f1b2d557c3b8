use std::collections::BTreeMap;
use std::fmt;

/// A mapping from namespace prefixes to IRIs.
///
/// A prefix is bound to at most one IRI.
/// [`bind`](Self::bind) additionally keeps IRIs unique, which is the behavior wanted while merging parsed documents.
///
/// ```
/// use oxentail::PrefixMap;
///
/// let mut prefixes = PrefixMap::new();
/// prefixes.bind("ex", "http://example.com/");
/// // The IRI is already bound: the existing binding wins
/// assert_eq!(prefixes.bind("other", "http://example.com/"), None);
/// // The prefix is already bound to another IRI: it gets disambiguated
/// assert_eq!(
///     prefixes.bind("ex", "http://example.org/").as_deref(),
///     Some("exx")
/// );
/// assert_eq!(prefixes.iri("exx"), Some("http://example.org/"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    by_prefix: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the IRI bound to the given prefix.
    pub fn iri(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    /// Returns a prefix bound to the given IRI.
    pub fn prefix(&self, iri: &str) -> Option<&str> {
        self.by_prefix
            .iter()
            .find(|(_, bound)| *bound == iri)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Binds a prefix without ever overriding an existing binding.
    ///
    /// If the IRI already has a prefix nothing is done and `None` is returned.
    /// Otherwise `x` is appended to the prefix until it is free and the actually bound prefix is returned.
    pub fn bind(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Option<String> {
        let iri = iri.into();
        if self.prefix(&iri).is_some() {
            return None;
        }
        let mut prefix = prefix.into();
        while self.by_prefix.contains_key(&prefix) {
            prefix.push('x');
        }
        self.by_prefix.insert(prefix.clone(), iri);
        Some(prefix)
    }

    /// Binds a prefix, replacing the IRI it was bound to if any.
    ///
    /// Returns the previously bound IRI.
    pub fn set(&mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Option<String> {
        self.by_prefix.insert(prefix.into(), iri.into())
    }

    /// Adds the bindings of `defaults` whose prefix is not bound yet and whose IRI has no prefix yet.
    pub fn with_defaults(&mut self, defaults: &Self) {
        for (prefix, iri) in defaults {
            if self.iri(prefix).is_none() && self.prefix(iri).is_none() {
                self.set(prefix, iri);
            }
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.by_prefix.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }
}

impl<'a> IntoIterator for &'a PrefixMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PrefixMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (prefix, iri) in self {
            writeln!(f, "@prefix {prefix}: <{iri}> .")?;
        }
        Ok(())
    }
}

/// Iterator returned by [`PrefixMap::iter`].
pub struct Iter<'a> {
    inner: std::collections::btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
