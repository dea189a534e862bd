use thiserror::Error;

use crate::form_list::FormListError;
use crate::manifest::ManifestError;

/// A request to the server (or handling its response) failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("{url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{url}: response body is not valid UTF-8")]
    NotUtf8 { url: String },
    #[error("writing response body: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    FormList(#[from] FormListError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
