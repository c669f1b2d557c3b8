//! Builds the background and main graphs from files and URIs and resolves their `owl:imports`.
//!
//! ```
//! use oxentail::{FetchError, FetchedDocument, Fetcher, OntologyLoader, Target};
//!
//! struct Web;
//!
//! impl Fetcher for Web {
//!     fn fetch(&self, uri: &str) -> Result<FetchedDocument, FetchError> {
//!         match uri {
//!             "http://example.com/animals" => Ok(FetchedDocument::new(
//!                 "<http://example.com/animals> a <http://www.w3.org/2002/07/owl#Ontology> ;
//!                     <http://www.w3.org/2002/07/owl#imports> <http://example.com/life> .".as_bytes(),
//!                 Some("text/turtle".into()),
//!             )),
//!             "http://example.com/life" => Ok(FetchedDocument::new(
//!                 "<http://example.com/Animal> a <http://www.w3.org/2002/07/owl#Class> .".as_bytes(),
//!                 Some("text/turtle".into()),
//!             )),
//!             _ => Err(FetchError::NotFound(uri.into())),
//!         }
//!     }
//! }
//!
//! let mut loader = OntologyLoader::with_fetcher(Web);
//! loader.load_uri("http://example.com/animals", Target::Main);
//! assert_eq!(loader.main().len(), 2);
//! assert_eq!(loader.background().len(), 1);
//! assert!(loader.is_fetched("http://example.com/life"));
//! ```

mod blacklist;
mod fetch;

use crate::error::LoadError;
use crate::graph::Graph;
use crate::prefix::PrefixMap;
use crate::vocab::owl;
pub use blacklist::Blacklist;
pub use fetch::{DefaultFetcher, FetchedDocument, Fetcher};
use oxiri::Iri;
use oxrdf::vocab::rdf;
use oxrdf::{NamedOrBlankNodeRef, TermRef, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{self, Path};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// The graph a document is loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Main,
    Background,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Main => "main",
            Self::Background => "background",
        })
    }
}

/// Loads RDF documents into a background and a main [`Graph`].
///
/// Loading never fails: unreadable sources are logged and skipped.
/// When auto import is enabled (the default), the `owl:imports` targets of every loaded document
/// are fetched into the background graph, breadth first.
/// A URI is never fetched twice, whether it is reached by several import paths
/// or because it is the IRI of an already loaded ontology.
pub struct OntologyLoader<F = DefaultFetcher> {
    fetcher: F,
    main: Graph,
    background: Graph,
    fetched: FxHashSet<String>,
    blacklist: Blacklist,
    hint_format: Option<RdfFormat>,
    first_format: Option<RdfFormat>,
    auto_import: bool,
}

impl OntologyLoader {
    pub fn new() -> Self {
        Self::with_fetcher(DefaultFetcher::new())
    }
}

impl Default for OntologyLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher> OntologyLoader<F> {
    /// Builds a loader retrieving URIs with the given fetcher.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            main: Graph::new(),
            background: Graph::new(),
            fetched: FxHashSet::default(),
            blacklist: Blacklist::new(),
            hint_format: None,
            first_format: None,
            auto_import: true,
        }
    }

    /// Sets the format to use when it is not possible to guess it.
    ///
    /// Files are guessed from their extension.
    /// URIs are guessed from the media type returned by the fetcher, then from their path extension.
    #[must_use]
    pub fn with_hint_format(mut self, format: Option<RdfFormat>) -> Self {
        self.hint_format = format;
        self
    }

    /// Enables or disables `owl:imports` resolution.
    #[must_use]
    pub fn with_auto_import(mut self, auto_import: bool) -> Self {
        self.auto_import = auto_import;
        self
    }

    /// Adds URIs that imports must never resolve to.
    #[must_use]
    pub fn with_blacklist(mut self, uris: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for uri in uris {
            self.blacklist.insert(uri);
        }
        self
    }

    /// Adds regular expressions matching whole URIs that imports must never resolve to.
    pub fn with_blacklist_regex(
        mut self,
        patterns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, regex::Error> {
        for pattern in patterns {
            self.blacklist.insert_pattern(pattern.as_ref())?;
        }
        Ok(self)
    }

    pub fn main(&self) -> &Graph {
        &self.main
    }

    pub fn background(&self) -> &Graph {
        &self.background
    }

    /// Returns the `(background, main)` graphs.
    pub fn into_graphs(self) -> (Graph, Graph) {
        (self.background, self.main)
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Checks if the URI has already been fetched or identifies an already loaded ontology.
    pub fn is_fetched(&self, uri: &str) -> bool {
        self.fetched.contains(uri)
    }

    /// The fetched URIs and loaded ontology IRIs, in no particular order.
    pub fn fetched(&self) -> impl Iterator<Item = &str> {
        self.fetched.iter().map(String::as_str)
    }

    /// The format of the first file successfully loaded.
    pub fn first_format(&self) -> Option<RdfFormat> {
        self.first_format
    }

    /// Loads a file, guessing its format from its extension.
    ///
    /// Returns `false` if the file has been skipped.
    pub fn load_file(&mut self, path: impl AsRef<Path>, target: Target) -> bool {
        let path = path.as_ref();
        let start = Instant::now();
        match self.read_file(path) {
            Ok((graph, url, format)) => {
                if self.first_format.is_none() {
                    self.first_format = Some(format);
                }
                self.fetched.insert(url.to_string());
                let imports = self.add_graph(graph, target, url.as_str(), start);
                self.resolve_imports(imports);
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping file {}", path.display());
                false
            }
        }
    }

    /// Fetches and loads a URI.
    ///
    /// Returns `false` if the URI has been skipped, in particular if it has already been fetched.
    pub fn load_uri(&mut self, uri: &str, target: Target) -> bool {
        match self.fetch_into(uri, target) {
            Some(imports) => {
                self.resolve_imports(imports);
                true
            }
            None => false,
        }
    }

    /// Loads the argument as a URI if it looks like one and as a file path otherwise.
    pub fn load(&mut self, file_or_uri: &str, target: Target) -> bool {
        if looks_like_uri(file_or_uri) {
            self.load_uri(file_or_uri, target)
        } else {
            self.load_file(file_or_uri, target)
        }
    }

    /// Loads all the given files, in order.
    pub fn files(&mut self, paths: impl IntoIterator<Item = impl AsRef<Path>>, target: Target) {
        for path in paths {
            self.load_file(path, target);
        }
    }

    /// Loads all the given URIs, in order.
    pub fn uris(&mut self, uris: impl IntoIterator<Item = impl AsRef<str>>, target: Target) {
        for uri in uris {
            self.load_uri(uri.as_ref(), target);
        }
    }

    /// Loads all the given files or URIs, in order, see [`load`](Self::load).
    pub fn guess(&mut self, sources: impl IntoIterator<Item = impl AsRef<str>>, target: Target) {
        for source in sources {
            self.load(source.as_ref(), target);
        }
    }

    fn read_file(&self, path: &Path) -> Result<(Graph, Url, RdfFormat), LoadError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(RdfFormat::from_extension)
            .or(self.hint_format)
            .ok_or_else(|| LoadError::UnknownFormat(path.display().to_string()))?;
        let url = Url::from_file_path(path::absolute(path)?).map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} can't be converted to a file: URL", path.display()),
            )
        })?;
        let graph = parse(BufReader::new(File::open(path)?), format, url.as_str())?;
        Ok((graph, url, format))
    }

    /// Fetches `uri` and returns the imports of the loaded document, or `None` if it was skipped.
    fn fetch_into(&mut self, uri: &str, target: Target) -> Option<Vec<String>> {
        if !self.fetched.insert(uri.to_owned()) {
            debug!(uri, "Skipping {uri}: already fetched");
            return None;
        }
        let start = Instant::now();
        match self.read_uri(uri) {
            Ok(graph) => Some(self.add_graph(graph, target, uri, start)),
            Err(e) if e.is_not_found() => {
                warn!(uri, "Skipping {uri}: not found");
                None
            }
            Err(e) => {
                warn!(uri, error = %e, "Skipping {uri}");
                None
            }
        }
    }

    fn read_uri(&self, uri: &str) -> Result<Graph, LoadError> {
        let iri = Iri::parse(uri)?;
        let document = self.fetcher.fetch(uri)?;
        let format = document
            .content_type
            .as_deref()
            .filter(|media_type| !is_plain_text(media_type))
            .and_then(RdfFormat::from_media_type)
            .or_else(|| {
                let name = iri.path().rsplit('/').next()?;
                RdfFormat::from_extension(name.rsplit_once('.')?.1)
            })
            .or(self.hint_format)
            .ok_or_else(|| LoadError::UnknownFormat(uri.into()))?;
        parse(document.body, format, uri)
    }

    /// Merges a freshly loaded document and returns the imports to resolve.
    fn add_graph(&mut self, graph: Graph, target: Target, source: &str, start: Instant) -> Vec<String> {
        let ontologies = ontology_iris(&graph);
        let imports = if self.auto_import {
            discover_imports(&graph)
        } else {
            Vec::new()
        };
        info!(
            source,
            destination = %target,
            triples = graph.len(),
            ontologies = ?ontologies,
            elapsed = ?start.elapsed(),
            "Loaded {} triples from {source} into {target}",
            graph.len()
        );
        self.fetched.extend(ontologies);
        match target {
            Target::Main => self.main.merge(graph),
            Target::Background => self.background.merge(graph),
        }
        imports
    }

    fn resolve_imports(&mut self, imports: Vec<String>) {
        let mut queue = VecDeque::from(imports);
        while let Some(uri) = queue.pop_front() {
            if self.blacklist.contains(&uri) {
                debug!(uri, "Not importing blacklisted {uri}");
                continue;
            }
            if let Some(imports) = self.fetch_into(&uri, Target::Background) {
                queue.extend(imports);
            }
        }
    }
}

/// Returns the IRIs imported by the graph with `owl:imports`, without trailing `#` and duplicates.
pub fn discover_imports(graph: &Graph) -> Vec<String> {
    let mut seen = FxHashSet::default();
    graph
        .triples_for_predicate(owl::IMPORTS)
        .filter_map(|t| match t.object {
            TermRef::NamedNode(n) => Some(n.as_str()),
            _ => None,
        })
        .map(|iri| iri.strip_suffix('#').unwrap_or(iri))
        .filter(|iri| seen.insert(*iri))
        .map(ToOwned::to_owned)
        .collect()
}

/// The IRIs of the `owl:Ontology` instances of the graph, blank nodes excluded.
fn ontology_iris(graph: &Graph) -> Vec<String> {
    graph
        .as_oxrdf()
        .subjects_for_predicate_object(rdf::TYPE, owl::ONTOLOGY)
        .filter_map(|s| match s {
            NamedOrBlankNodeRef::NamedNode(n) => Some(n.as_str().to_owned()),
            NamedOrBlankNodeRef::BlankNode(_) => None,
        })
        .collect()
}

/// `text/plain` carries no information about the syntax.
fn is_plain_text(media_type: &str) -> bool {
    media_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/plain"))
}

/// Checks if the string starts like an `http`, `https`, `ftp` or `file` URL.
pub fn looks_like_uri(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    match scheme {
        "file" => rest.starts_with('/'),
        "http" | "https" | "ftp" => rest.starts_with("//"),
        _ => false,
    }
}

fn parse(read: impl Read, format: RdfFormat, base_iri: &str) -> Result<Graph, LoadError> {
    let mut parser = RdfParser::from_format(format)
        .with_base_iri(base_iri)?
        .rename_blank_nodes()
        .for_reader(read);
    let mut graph = Graph::new();
    // Prefixes are bound as soon as they are declared so that a redefined prefix keeps its former binding
    let mut declared = FxHashMap::default();
    while let Some(quad) = parser.next() {
        graph.insert(&Triple::from(quad?));
        bind_declared_prefixes(parser.prefixes(), &mut declared, graph.prefixes_mut());
    }
    bind_declared_prefixes(parser.prefixes(), &mut declared, graph.prefixes_mut());
    Ok(graph)
}

fn bind_declared_prefixes<'a>(
    current: impl IntoIterator<Item = (&'a str, &'a str)>,
    declared: &mut FxHashMap<String, String>,
    prefixes: &mut PrefixMap,
) {
    for (prefix, iri) in current {
        if declared.get(prefix).is_none_or(|bound| bound != iri) {
            prefixes.bind(prefix, iri);
            declared.insert(prefix.to_owned(), iri.to_owned());
        }
    }
}
