use thiserror::Error;

/// Why a backend fetch could not produce usable data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("payload contained no usable rows")]
    Empty,
    #[error("invalid endpoint URL '{0}'")]
    InvalidUrl(String),
}
