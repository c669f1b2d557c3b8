//! [In-memory graphs](Graph) carrying namespace prefixes and the [`TripleSource`] abstraction reasoners read from.
//!
//! Usage example:
//! ```
//! use oxentail::Graph;
//! use oxrdf::{NamedNodeRef, TripleRef};
//!
//! let ex = NamedNodeRef::new("http://example.com")?;
//! let mut graph = Graph::new();
//! graph.insert(TripleRef::new(ex, ex, ex));
//! graph.prefixes_mut().bind("ex", "http://example.com/");
//!
//! assert!(graph.contains(TripleRef::new(ex, ex, ex)));
//! assert_eq!(graph.len(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::prefix::PrefixMap;
use oxrdf::{NamedNodeRef, Triple, TripleRef};
use std::fmt;

/// A read-only set of triples.
///
/// It is implemented by [`Graph`] and by views like [`GraphUnion`](crate::GraphUnion).
/// Reasoners only read their inputs through this trait.
pub trait TripleSource {
    /// Checks if the source contains the given triple.
    fn contains(&self, triple: TripleRef<'_>) -> bool;

    /// Returns all the triples of the source, each of them exactly once.
    fn iter(&self) -> Box<dyn Iterator<Item = TripleRef<'_>> + '_>;

    /// Returns the number of distinct triples of the source.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory [RDF graph](https://www.w3.org/TR/rdf11-concepts/#dfn-graph) with its namespace prefixes.
#[derive(Debug, Default)]
pub struct Graph {
    triples: oxrdf::Graph,
    prefixes: PrefixMap,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of the triples of `source` that are contained in none of `excluded`.
    ///
    /// The returned graph has no prefix.
    pub fn from_difference(source: &dyn TripleSource, excluded: &[&dyn TripleSource]) -> Self {
        let mut graph = Self::new();
        for triple in source.iter() {
            if excluded.iter().all(|e| !e.contains(triple)) {
                graph.insert(triple);
            }
        }
        graph
    }

    /// Adds a triple to the graph.
    ///
    /// Returns `false` if the triple was already in the graph.
    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.triples.insert(triple)
    }

    /// Checks if the graph contains the given triple.
    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.triples.contains(triple)
    }

    /// Returns the number of triples in this graph.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Checks if this graph contains a triple.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns all the triples contained by the graph.
    pub fn iter(&self) -> oxrdf::graph::Iter<'_> {
        self.triples.iter()
    }

    /// Returns the triples with the given predicate.
    pub fn triples_for_predicate<'a, 'b>(
        &'a self,
        predicate: impl Into<NamedNodeRef<'b>>,
    ) -> impl Iterator<Item = TripleRef<'a>> + 'a {
        self.triples.triples_for_predicate(predicate)
    }

    /// The namespace prefixes of this graph.
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixMap {
        &mut self.prefixes
    }

    /// Moves all the triples of `other` into this graph.
    ///
    /// The prefixes of `other` are bound following [`PrefixMap::bind`]: existing bindings always win.
    pub fn merge(&mut self, other: Self) {
        for triple in &other.triples {
            self.triples.insert(triple);
        }
        for (prefix, iri) in &other.prefixes {
            self.prefixes.bind(prefix, iri);
        }
    }

    /// Inserts all the triples of the given source, ignoring prefixes.
    pub fn extend_from(&mut self, source: &dyn TripleSource) {
        for triple in source.iter() {
            self.triples.insert(triple);
        }
    }

    /// Gives access to the underlying [`oxrdf::Graph`] and its indexes.
    pub fn as_oxrdf(&self) -> &oxrdf::Graph {
        &self.triples
    }
}

impl TripleSource for Graph {
    fn contains(&self, triple: TripleRef<'_>) -> bool {
        self.triples.contains(triple)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = TripleRef<'_>> + '_> {
        Box::new(self.triples.iter())
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

impl From<oxrdf::Graph> for Graph {
    fn from(triples: oxrdf::Graph) -> Self {
        Self {
            triples,
            prefixes: PrefixMap::new(),
        }
    }
}

impl PartialEq for Graph {
    /// Two graphs are equal if they contain the same triples, prefixes are ignored.
    ///
    /// Blank nodes are compared by identifier, this is not an isomorphism check.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for Graph {}

impl<'a> IntoIterator for &'a Graph {
    type Item = TripleRef<'a>;
    type IntoIter = oxrdf::graph::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.triples.insert(&triple);
        }
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.triples.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::rdfs;

    fn triple(s: &str, o: &str) -> Triple {
        Triple::new(
            oxrdf::NamedNode::new_unchecked(s),
            rdfs::SUB_CLASS_OF,
            oxrdf::NamedNode::new_unchecked(o),
        )
    }

    #[test]
    fn difference_excludes_every_listed_source() {
        let source: Graph = [
            triple("http://ex/a", "http://ex/b"),
            triple("http://ex/b", "http://ex/c"),
            triple("http://ex/a", "http://ex/c"),
        ]
        .into_iter()
        .collect();
        let first: Graph = [triple("http://ex/a", "http://ex/b")].into_iter().collect();
        let second: Graph = [triple("http://ex/b", "http://ex/c")].into_iter().collect();
        let difference = Graph::from_difference(&source, &[&first, &second]);
        assert_eq!(difference.len(), 1);
        assert!(difference.contains(&triple("http://ex/a", "http://ex/c")));
    }

    #[test]
    fn merge_keeps_existing_prefixes() {
        let mut target = Graph::new();
        target.prefixes_mut().set("ex", "http://example.com/");
        let mut other: Graph = [triple("http://ex/a", "http://ex/b")].into_iter().collect();
        other.prefixes_mut().set("ex", "http://example.org/");
        other.prefixes_mut().set("same", "http://example.com/");
        target.merge(other);
        assert_eq!(target.len(), 1);
        assert_eq!(target.prefixes().iri("ex"), Some("http://example.com/"));
        assert_eq!(target.prefixes().iri("exx"), Some("http://example.org/"));
        assert_eq!(target.prefixes().iri("same"), None);
    }

    #[test]
    fn equality_ignores_prefixes() {
        let mut a: Graph = [triple("http://ex/a", "http://ex/b")].into_iter().collect();
        let b: Graph = [triple("http://ex/a", "http://ex/b")].into_iter().collect();
        a.prefixes_mut().set("ex", "http://ex/");
        assert_eq!(a, b);
    }
}
