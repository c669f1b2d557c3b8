use crate::error::ReasoningError;
use crate::graph::{Graph, TripleSource};
use crate::reasoner::rules::{Profile, Rule};
use crate::reasoner::{BoundReasoner, Reasoner, ReasonerConfig};
use std::fmt;
use std::time::Instant;
use tracing::debug;

/// Forward-chaining reasoner materializing the fixpoint of the rules of a [`Profile`].
///
/// ```
/// use oxentail::{ForwardChainer, Graph, Profile, Reasoner, ReasonerConfig};
/// use oxrdf::vocab::{rdf, rdfs};
/// use oxrdf::{NamedNodeRef, TripleRef};
///
/// let dog = NamedNodeRef::new("http://example.com/Dog")?;
/// let animal = NamedNodeRef::new("http://example.com/Animal")?;
/// let rex = NamedNodeRef::new("http://example.com/Rex")?;
///
/// let mut schema = Graph::new();
/// schema.insert(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal));
/// let mut data = Graph::new();
/// data.insert(TripleRef::new(rex, rdf::TYPE, dog));
///
/// let reasoner = ForwardChainer::new(Profile::Rdfs, ReasonerConfig::default());
/// let closure = reasoner.bind_schema(&schema)?.bind(&data)?;
/// assert!(closure.contains(TripleRef::new(rex, rdf::TYPE, animal)));
/// assert_eq!(closure.len(), 3);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct ForwardChainer {
    profile: Profile,
    config: ReasonerConfig,
}

impl ForwardChainer {
    pub fn new(profile: Profile, config: ReasonerConfig) -> Self {
        Self { profile, config }
    }

    fn saturate(&self, graph: &mut oxrdf::Graph) -> Result<(), ReasoningError> {
        saturate(self.profile.rules(), &self.config, graph)
    }
}

impl Reasoner for ForwardChainer {
    fn profile(&self) -> &str {
        self.profile.name()
    }

    fn bind_schema(
        &self,
        schema: &dyn TripleSource,
    ) -> Result<Box<dyn BoundReasoner + '_>, ReasoningError> {
        let mut closure = oxrdf::Graph::new();
        for triple in schema.iter() {
            closure.insert(triple);
        }
        self.saturate(&mut closure)?;
        Ok(Box::new(BoundSchema {
            reasoner: self,
            closure,
        }))
    }
}

/// The schema closure is computed once and reused by every [`bind`](BoundReasoner::bind) call.
struct BoundSchema<'a> {
    reasoner: &'a ForwardChainer,
    closure: oxrdf::Graph,
}

impl BoundReasoner for BoundSchema<'_> {
    fn bind(&self, data: &dyn TripleSource) -> Result<Graph, ReasoningError> {
        let mut closure = oxrdf::Graph::new();
        for triple in &self.closure {
            closure.insert(triple);
        }
        for triple in data.iter() {
            closure.insert(triple);
        }
        self.reasoner.saturate(&mut closure)?;
        Ok(closure.into())
    }
}

impl fmt::Display for ForwardChainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ForwardChainer(profile={}, rules={})",
            self.profile.name(),
            self.profile.rules().len()
        )
    }
}

fn saturate(
    rules: &[Rule],
    config: &ReasonerConfig,
    graph: &mut oxrdf::Graph,
) -> Result<(), ReasoningError> {
    let start = Instant::now();
    let initial_size = graph.len();
    let mut inferred = Vec::new();
    for iteration in 1..=config.max_iterations {
        if let Some(timeout) = config.timeout {
            if start.elapsed() >= timeout {
                return Err(ReasoningError::Timeout(timeout));
            }
        }
        for rule in rules {
            rule.apply(graph, &mut inferred);
        }
        let mut added = 0;
        for triple in inferred.drain(..) {
            if graph.insert(&triple) {
                added += 1;
            }
        }
        debug!(iteration, added, "forward chaining iteration");
        if added == 0 {
            return Ok(());
        }
        if let Some(limit) = config.max_inferred_triples {
            if graph.len() - initial_size > limit {
                return Err(ReasoningError::MaterializationLimit(limit));
            }
        }
    }
    Err(ReasoningError::IterationLimit(config.max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::owl;
    use oxrdf::vocab::{rdf, rdfs};
    use oxrdf::{NamedNode, Triple};
    use std::time::Duration;

    fn ex(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn chain(length: usize) -> Graph {
        (0..length)
            .map(|i| {
                Triple::new(
                    ex(&format!("C{i}")),
                    rdfs::SUB_CLASS_OF,
                    ex(&format!("C{}", i + 1)),
                )
            })
            .collect()
    }

    #[test]
    fn schema_closure_is_reused() -> Result<(), ReasoningError> {
        let reasoner = ForwardChainer::new(Profile::Trans, ReasonerConfig::default());
        let bound = reasoner.bind_schema(&chain(3))?;
        // C0 < C1 < C2 < C3: 3 asserted + 3 inferred
        assert_eq!(bound.bind(&Graph::new())?.len(), 6);
        let data: Graph = [Triple::new(ex("C3"), rdfs::SUB_CLASS_OF, ex("C4"))]
            .into_iter()
            .collect();
        // 4 asserted + 6 inferred
        assert_eq!(bound.bind(&data)?.len(), 10);
        Ok(())
    }

    #[test]
    fn trans_profile_does_not_type() -> Result<(), ReasoningError> {
        let reasoner = ForwardChainer::new(Profile::Trans, ReasonerConfig::default());
        let mut data = chain(1);
        data.insert(&Triple::new(ex("x"), rdf::TYPE, ex("C0")));
        let closure = reasoner.closure(&data)?;
        assert_eq!(closure, data);
        Ok(())
    }

    #[test]
    fn owl_rl_transitive_and_same_as() -> Result<(), ReasoningError> {
        let reasoner = ForwardChainer::new(Profile::OwlRl, ReasonerConfig::default());
        let data: Graph = [
            Triple::new(ex("partOf"), rdf::TYPE, owl::TRANSITIVE_PROPERTY),
            Triple::new(ex("a"), ex("partOf"), ex("b")),
            Triple::new(ex("b"), ex("partOf"), ex("c")),
            Triple::new(ex("c"), ex("partOf"), ex("d")),
            Triple::new(ex("x"), owl::SAME_AS, ex("y")),
        ]
        .into_iter()
        .collect();
        let closure = reasoner.closure(&data)?;
        assert!(closure.contains(&Triple::new(ex("a"), ex("partOf"), ex("d"))));
        assert!(closure.contains(&Triple::new(ex("y"), owl::SAME_AS, ex("x"))));
        assert!(closure.contains(&Triple::new(ex("x"), owl::SAME_AS, ex("x"))));
        Ok(())
    }

    #[test]
    fn iteration_limit_is_fatal() {
        let reasoner = ForwardChainer::new(
            Profile::Trans,
            ReasonerConfig {
                max_iterations: 1,
                ..ReasonerConfig::default()
            },
        );
        assert!(matches!(
            reasoner.closure(&chain(4)),
            Err(ReasoningError::IterationLimit(1))
        ));
    }

    #[test]
    fn materialization_limit_is_fatal() {
        let reasoner = ForwardChainer::new(
            Profile::Trans,
            ReasonerConfig {
                max_inferred_triples: Some(2),
                ..ReasonerConfig::default()
            },
        );
        assert!(matches!(
            reasoner.closure(&chain(5)),
            Err(ReasoningError::MaterializationLimit(2))
        ));
    }

    #[test]
    fn zero_timeout_is_fatal() {
        let reasoner = ForwardChainer::new(
            Profile::Rdfs,
            ReasonerConfig {
                timeout: Some(Duration::ZERO),
                ..ReasonerConfig::default()
            },
        );
        assert!(matches!(
            reasoner.closure(&chain(1)),
            Err(ReasoningError::Timeout(_))
        ));
    }
}
