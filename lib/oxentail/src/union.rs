use crate::graph::TripleSource;
use oxrdf::TripleRef;

/// A read-only view of the union of several [triple sources](TripleSource).
///
/// Nothing is copied: the view only borrows the wrapped sources,
/// it always reflects their current content and dropping it leaves them untouched.
///
/// ```
/// use oxentail::{Graph, GraphUnion, TripleSource};
/// use oxrdf::{NamedNodeRef, TripleRef};
///
/// let ex = NamedNodeRef::new("http://example.com")?;
/// let mut background = Graph::new();
/// background.insert(TripleRef::new(ex, ex, ex));
/// let mut main = Graph::new();
/// main.insert(TripleRef::new(ex, ex, ex));
///
/// let sources: [&dyn TripleSource; 2] = [&background, &main];
/// let union = GraphUnion::new(sources);
/// assert_eq!(union.len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Default)]
pub struct GraphUnion<'a> {
    sources: Vec<&'a dyn TripleSource>,
}

impl<'a> GraphUnion<'a> {
    pub fn new(sources: impl IntoIterator<Item = &'a dyn TripleSource>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// Adds a source to the view.
    #[must_use]
    pub fn with(mut self, source: &'a dyn TripleSource) -> Self {
        self.sources.push(source);
        self
    }

    /// The wrapped sources, in order.
    pub fn sources(&self) -> &[&'a dyn TripleSource] {
        &self.sources
    }
}

impl TripleSource for GraphUnion<'_> {
    fn contains(&self, triple: TripleRef<'_>) -> bool {
        self.sources.iter().any(|s| s.contains(triple))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = TripleRef<'_>> + '_> {
        Box::new(
            self.sources
                .iter()
                .enumerate()
                .flat_map(move |(i, source)| {
                    let previous = &self.sources[..i];
                    // A triple is yielded by the first source containing it
                    source
                        .iter()
                        .filter(move |t| previous.iter().all(|p| !p.contains(*t)))
                }),
        )
    }

    fn len(&self) -> usize {
        self.iter().count()
    }

    fn is_empty(&self) -> bool {
        self.sources.iter().all(|s| s.is_empty())
    }
}
