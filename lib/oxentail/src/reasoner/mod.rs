//! The reasoner capability consumed by the [`SplitReasoner`](crate::SplitReasoner).
//!
//! A [`Reasoner`] is first bound to a schema, then the [`BoundReasoner`] it returns
//! computes closures for any number of data graphs.

mod forward;
mod registry;
mod rules;

use crate::error::ReasoningError;
use crate::graph::{Graph, TripleSource};
pub use forward::ForwardChainer;
pub use registry::{ReasonerEntry, lookup, reasoner_names, reasoners};
pub use rules::{Profile, Rule};
use std::time::Duration;

/// Limits enforced while computing a closure.
///
/// Reaching any of them aborts the computation with a [`ReasoningError`].
#[derive(Debug, Clone)]
pub struct ReasonerConfig {
    /// Maximum number of iterations for fixpoint computation.
    pub max_iterations: usize,
    /// Maximum time allowed for a closure computation (None = unlimited).
    pub timeout: Option<Duration>,
    /// Maximum number of inferred triples to materialize (None = unlimited).
    pub max_inferred_triples: Option<usize>,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            timeout: None,
            max_inferred_triples: None,
        }
    }
}

/// An entailment regime able to compute closures.
pub trait Reasoner {
    /// The name of the active profile.
    fn profile(&self) -> &str;

    /// Binds the reasoner to a schema.
    ///
    /// The schema is read during this call only: the returned reasoner does not borrow it.
    fn bind_schema(
        &self,
        schema: &dyn TripleSource,
    ) -> Result<Box<dyn BoundReasoner + '_>, ReasoningError>;

    /// Computes the closure of `data` without any schema.
    fn closure(&self, data: &dyn TripleSource) -> Result<Graph, ReasoningError> {
        self.bind_schema(&Graph::new())?.bind(data)
    }
}

/// A reasoner bound to a schema.
pub trait BoundReasoner {
    /// Computes the closure of the schema and `data` together.
    ///
    /// The closure contains the schema and `data` triples themselves.
    fn bind(&self, data: &dyn TripleSource) -> Result<Graph, ReasoningError>;
}
