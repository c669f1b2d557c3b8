use oxiri::IriParseError;
use oxrdfio::RdfParseError;
use std::io;
use std::time::Duration;

/// An invalid reasoner or profile selection.
///
/// It is always detected before any input is loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No reasoner registered with name {0}")]
    UnknownReasoner(String),
    #[error("The {reasoner} reasoner has no profile named {profile}, available profiles: {}", .available.join(", "))]
    UnknownProfile {
        reasoner: &'static str,
        profile: String,
        available: &'static [&'static str],
    },
}

/// An error raised while computing a closure.
///
/// These errors are fatal: a truncated closure would silently be wrong.
#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("The closure did not reach a fixpoint after {0} iterations")]
    IterationLimit(usize),
    #[error("Reasoning timeout exceeded ({0:?})")]
    Timeout(Duration),
    #[error("Materialization limit exceeded ({0} triples)")]
    MaterializationLimit(usize),
}

/// An error raised while fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The document does not exist (HTTP 404 or missing file).
    #[error("{0} not found")]
    NotFound(String),
    #[error("The URI scheme of {0} is not supported")]
    UnsupportedScheme(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An error raised while loading a file or a URI.
///
/// The [`OntologyLoader`](crate::OntologyLoader) never lets these errors escape: it logs them and skips the source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] RdfParseError),
    #[error("Invalid IRI: {0}")]
    InvalidIri(#[from] IriParseError),
    #[error("Not able to guess the RDF format of {0}")]
    UnknownFormat(String),
}

impl LoadError {
    /// Checks if the error is a "not found" signal from the fetch source.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fetch(FetchError::NotFound(_)) => true,
            Self::Io(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
