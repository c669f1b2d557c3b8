use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use regex::Regex;
use rustc_hash::FxHashSet;

/// URIs that must never be dereferenced.
///
/// Exact entries are compared after removing a trailing `#`.
/// Patterns must match the whole URI.
#[derive(Debug, Clone)]
pub struct Blacklist {
    uris: FxHashSet<String>,
    patterns: Vec<Regex>,
}

impl Blacklist {
    /// A blacklist containing only the RDF, RDFS and OWL namespaces.
    pub fn new() -> Self {
        let mut blacklist = Self::empty();
        for namespace in [rdf::TYPE.as_str(), rdfs::CLASS.as_str(), owl::NAMESPACE] {
            let namespace = namespace
                .find('#')
                .map_or(namespace, |end| &namespace[..end]);
            blacklist.insert(namespace);
        }
        blacklist
    }

    /// A blacklist that lets everything through.
    pub fn empty() -> Self {
        Self {
            uris: FxHashSet::default(),
            patterns: Vec::new(),
        }
    }

    pub fn insert(&mut self, uri: impl Into<String>) {
        let mut uri = uri.into();
        if uri.ends_with('#') {
            uri.pop();
        }
        self.uris.insert(uri);
    }

    /// Adds a regular expression that must match a whole URI to exclude it.
    pub fn insert_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.patterns.push(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(())
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri.strip_suffix('#').unwrap_or(uri))
            || self.patterns.iter().any(|p| p.is_match(uri))
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new()
    }
}
