use crate::error::FetchError;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::time::Duration;
use url::Url;

/// A source of documents identified by URIs.
pub trait Fetcher {
    /// Retrieves the document identified by `uri`.
    ///
    /// A missing document must be reported as [`FetchError::NotFound`].
    fn fetch(&self, uri: &str) -> Result<FetchedDocument, FetchError>;
}

/// The result of a [`Fetcher::fetch`] call.
pub struct FetchedDocument {
    /// The media type declared by the source, if any.
    pub content_type: Option<String>,
    pub body: Box<dyn Read>,
}

impl FetchedDocument {
    pub fn new(body: impl Read + 'static, content_type: Option<String>) -> Self {
        Self {
            content_type,
            body: Box::new(body),
        }
    }
}

const ACCEPT: &str = "text/turtle, application/rdf+xml;q=0.9, application/n-triples;q=0.8, application/ld+json;q=0.7, */*;q=0.1";

/// Reads `file:` URLs from the file system and, with the `http-client` feature, `http(s):` URLs from the network.
pub struct DefaultFetcher {
    #[cfg(feature = "http-client")]
    client: oxhttp::Client,
}

impl DefaultFetcher {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Sets the global timeout of HTTP requests.
    #[cfg_attr(not(feature = "http-client"), expect(unused_variables))]
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self {
            #[cfg(feature = "http-client")]
            client: http_client(timeout),
        }
    }

    fn fetch_file(url: &Url) -> Result<FetchedDocument, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|()| FetchError::UnsupportedScheme(url.to_string()))?;
        match File::open(&path) {
            Ok(file) => Ok(FetchedDocument::new(BufReader::new(file), None)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(url.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(feature = "http-client")]
    fn fetch_http(&self, url: &Url) -> Result<FetchedDocument, FetchError> {
        use oxhttp::model::Request;
        use oxhttp::model::header::{ACCEPT as ACCEPT_HEADER, CONTENT_TYPE};

        let request = Request::builder()
            .uri(url.as_str())
            .header(ACCEPT_HEADER, ACCEPT)
            .body(())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let response = self.client.request(request)?;
        let status = response.status();
        if status.as_u16() == 404 || status.as_u16() == 410 {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(io::Error::other(format!("Error {status} returned by {url}")).into());
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        Ok(FetchedDocument::new(response.into_body(), content_type))
    }
}

#[cfg(feature = "http-client")]
fn http_client(timeout: Option<Duration>) -> oxhttp::Client {
    let mut client = oxhttp::Client::new()
        .with_user_agent(concat!("oxentail/", env!("CARGO_PKG_VERSION")))
        .unwrap_or_else(|_| oxhttp::Client::new())
        .with_redirection_limit(10);
    if let Some(timeout) = timeout {
        client = client.with_global_timeout(timeout);
    }
    client
}

impl Default for DefaultFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for DefaultFetcher {
    fn fetch(&self, uri: &str) -> Result<FetchedDocument, FetchError> {
        let url = Url::parse(uri).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        match url.scheme() {
            "file" => Self::fetch_file(&url),
            #[cfg(feature = "http-client")]
            "http" | "https" => self.fetch_http(&url),
            _ => Err(FetchError::UnsupportedScheme(uri.into())),
        }
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, uri: &str) -> Result<FetchedDocument, FetchError> {
        (**self).fetch(uri)
    }
}
