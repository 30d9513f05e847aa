//! Error type for Graph requests

/// Failure of a single Graph call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required path identifier was empty. Raised before any request is sent.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}: {body}")]
    RequestFailed {
        status: u16,
        url: String,
        body: String,
    },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// HTTP status of a failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401 answer; the token is invalid or expired.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject an empty or whitespace-only path identifier.
pub(crate) fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::MissingParameter(name));
    }
    Ok(value)
}
