use crate::error::ReasoningError;
use crate::graph::{Graph, TripleSource};
use crate::reasoner::Reasoner;
use crate::union::GraphUnion;
use std::time::Instant;
use tracing::info;

/// Computes entailments while telling apart what follows from a background graph alone
/// from what only follows once the main graph is added.
///
/// With echo disabled only newly inferred triples are reported.
/// With echo enabled the input triples are reported too, but never twice.
///
/// ```
/// use oxentail::{ForwardChainer, Graph, Profile, ReasonerConfig, SplitReasoner};
/// use oxrdf::vocab::{rdf, rdfs};
/// use oxrdf::{NamedNodeRef, TripleRef};
///
/// let dog = NamedNodeRef::new("http://example.com/Dog")?;
/// let animal = NamedNodeRef::new("http://example.com/Animal")?;
/// let rex = NamedNodeRef::new("http://example.com/Rex")?;
/// let mut background = Graph::new();
/// background.insert(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal));
/// let mut main = Graph::new();
/// main.insert(TripleRef::new(rex, rdf::TYPE, dog));
///
/// let reasoner = SplitReasoner::new(
///     Box::new(ForwardChainer::new(Profile::Rdfs, ReasonerConfig::default())),
///     false,
/// );
/// let output = reasoner.split(&background, &main)?;
/// assert!(output.background.is_empty());
/// assert_eq!(output.main.len(), 1);
/// assert!(output.main.contains(TripleRef::new(rex, rdf::TYPE, animal)));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct SplitReasoner {
    reasoner: Box<dyn Reasoner>,
    echo: bool,
}

/// The two disjoint graphs computed by [`SplitReasoner::split`].
#[derive(Debug, Default)]
pub struct SplitOutput {
    /// What follows from the background graph alone.
    pub background: Graph,
    /// What follows from the background and main graphs together but not from the background alone.
    pub main: Graph,
}

impl SplitReasoner {
    pub fn new(reasoner: Box<dyn Reasoner>, echo: bool) -> Self {
        Self { reasoner, echo }
    }

    pub fn profile(&self) -> &str {
        self.reasoner.profile()
    }

    /// If echo is enabled, the outputs contain the input triples alongside the inferred ones.
    pub fn is_echo_enabled(&self) -> bool {
        self.echo
    }

    pub fn set_echo_enabled(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// Splits the entailments of `background` and `main` into two disjoint graphs.
    ///
    /// The background output gets the prefixes of `background`.
    /// The main output gets the prefixes of `main` completed by the ones of `background`.
    pub fn split(&self, background: &Graph, main: &Graph) -> Result<SplitOutput, ReasoningError> {
        let start = Instant::now();
        let bound = self.reasoner.bind_schema(background)?;

        let background_closure = bound.bind(&Graph::new())?;
        let main_closure = bound.bind(main)?;

        // Everything following from the background alone belongs to the background output,
        // even the background triples themselves that are hidden when echo is disabled
        let mut out_main = if self.echo {
            Graph::from_difference(&main_closure, &[&background_closure])
        } else {
            Graph::from_difference(&main_closure, &[&background_closure, main])
        };
        *out_main.prefixes_mut() = main.prefixes().clone();
        out_main.prefixes_mut().with_defaults(background.prefixes());

        let mut out_background = if self.echo {
            background_closure
        } else {
            Graph::from_difference(&background_closure, &[background])
        };
        *out_background.prefixes_mut() = background.prefixes().clone();

        let output = SplitOutput {
            background: out_background,
            main: out_main,
        };
        let (background_inferred, main_inferred) =
            output.inferred_counts(background, main, self.echo);
        info!(
            profile = self.profile(),
            background_inferred,
            main_inferred,
            elapsed = ?start.elapsed(),
            "Inferred {main_inferred} triples for main and {background_inferred} for background"
        );
        Ok(output)
    }

    /// Computes the entailments of any triple source at once.
    ///
    /// The result has no prefix.
    pub fn apply(&self, source: &dyn TripleSource) -> Result<Graph, ReasoningError> {
        let start = Instant::now();
        let closure = self.reasoner.closure(source)?;
        let result = if self.echo {
            closure
        } else {
            Graph::from_difference(&closure, &[source])
        };
        let inferred = if self.echo {
            result.len().saturating_sub(source.len())
        } else {
            result.len()
        };
        info!(
            profile = self.profile(),
            inferred,
            elapsed = ?start.elapsed(),
            "Inferred {inferred} triples"
        );
        Ok(result)
    }

    /// Computes the entailments of the union of `background` and `main` without copying them.
    ///
    /// The result gets the prefixes of `main` completed by the ones of `background`.
    pub fn apply_union(&self, background: &Graph, main: &Graph) -> Result<Graph, ReasoningError> {
        let sources: [&dyn TripleSource; 2] = [background, main];
        let union = GraphUnion::new(sources);
        let mut result = self.apply(&union)?;
        *result.prefixes_mut() = main.prefixes().clone();
        result.prefixes_mut().with_defaults(background.prefixes());
        Ok(result)
    }
}

impl SplitOutput {
    /// Counts the triples of the outputs that were not in the inputs, as `(background, main)`.
    pub fn inferred_counts(&self, background: &Graph, main: &Graph, echo: bool) -> (usize, usize) {
        if echo {
            (
                self.background.len().saturating_sub(background.len()),
                self.main.len().saturating_sub(main.len()),
            )
        } else {
            (self.background.len(), self.main.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoner::{ForwardChainer, Profile, ReasonerConfig};
    use oxrdf::vocab::{rdf, rdfs};
    use oxrdf::{NamedNode, Triple};

    fn ex(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn reasoner(profile: Profile, echo: bool) -> SplitReasoner {
        SplitReasoner::new(
            Box::new(ForwardChainer::new(profile, ReasonerConfig::default())),
            echo,
        )
    }

    fn inputs() -> (Graph, Graph) {
        let mut background: Graph = [
            Triple::new(ex("Dog"), rdfs::SUB_CLASS_OF, ex("Mammal")),
            Triple::new(ex("Mammal"), rdfs::SUB_CLASS_OF, ex("Animal")),
        ]
        .into_iter()
        .collect();
        background.prefixes_mut().set("ex", "http://example.com/");
        background
            .prefixes_mut()
            .set("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        let mut main: Graph = [Triple::new(ex("Rex"), rdf::TYPE, ex("Dog"))]
            .into_iter()
            .collect();
        main.prefixes_mut().set("ex", "http://example.com/main#");
        (background, main)
    }

    #[test]
    fn split_without_echo() -> Result<(), ReasoningError> {
        let (background, main) = inputs();
        let output = reasoner(Profile::Rdfs, false).split(&background, &main)?;
        assert_eq!(output.background.len(), 1);
        assert!(
            output
                .background
                .contains(&Triple::new(ex("Dog"), rdfs::SUB_CLASS_OF, ex("Animal")))
        );
        assert_eq!(output.main.len(), 2);
        assert!(
            output
                .main
                .contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Mammal")))
        );
        assert!(
            output
                .main
                .contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Animal")))
        );
        Ok(())
    }

    #[test]
    fn split_with_echo() -> Result<(), ReasoningError> {
        let (background, main) = inputs();
        let output = reasoner(Profile::Rdfs, true).split(&background, &main)?;
        assert_eq!(output.background.len(), 3);
        assert_eq!(output.main.len(), 3);
        assert!(output.main.contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Dog"))));
        assert_eq!(output.inferred_counts(&background, &main, true), (1, 2));
        Ok(())
    }

    #[test]
    fn split_prefixes() -> Result<(), ReasoningError> {
        let (background, main) = inputs();
        let output = reasoner(Profile::Rdfs, false).split(&background, &main)?;
        assert_eq!(output.background.prefixes(), background.prefixes());
        assert_eq!(
            output.main.prefixes().iri("ex"),
            Some("http://example.com/main#")
        );
        assert_eq!(
            output.main.prefixes().iri("rdfs"),
            Some("http://www.w3.org/2000/01/rdf-schema#")
        );
        Ok(())
    }

    #[test]
    fn echo_toggle() {
        let mut reasoner = reasoner(Profile::Trans, false);
        assert!(!reasoner.is_echo_enabled());
        reasoner.set_echo_enabled(true);
        assert!(reasoner.is_echo_enabled());
        assert_eq!(reasoner.profile(), "trans");
    }

    #[test]
    fn union_mode() -> Result<(), ReasoningError> {
        let (background, main) = inputs();
        let result = reasoner(Profile::Rdfs, false).apply_union(&background, &main)?;
        assert_eq!(result.len(), 3);
        assert!(!result.contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Dog"))));
        assert_eq!(
            result.prefixes().iri("ex"),
            Some("http://example.com/main#")
        );
        let echoed = reasoner(Profile::Rdfs, true).apply_union(&background, &main)?;
        assert_eq!(echoed.len(), 6);
        Ok(())
    }
}
