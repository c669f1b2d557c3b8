#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod graph;
mod loader;
mod prefix;
pub mod reasoner;
mod split;
mod union;
pub mod vocab;

pub use error::{ConfigurationError, FetchError, LoadError, ReasoningError};
pub use graph::{Graph, TripleSource};
pub use loader::{
    Blacklist, DefaultFetcher, FetchedDocument, Fetcher, OntologyLoader, Target, discover_imports,
    looks_like_uri,
};
pub use prefix::PrefixMap;
pub use reasoner::{BoundReasoner, ForwardChainer, Profile, Reasoner, ReasonerConfig};
pub use split::{SplitOutput, SplitReasoner};
pub use union::GraphUnion;
