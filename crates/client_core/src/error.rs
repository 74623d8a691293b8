use reqwest::StatusCode;
use thiserror::Error;

/// Network failure or non-success HTTP status. Error bodies are never interpreted.
#[derive(Debug, Clone, Error)]
#[error("GET {endpoint} failed{}: {message}", status_suffix(.status))]
pub struct TransportError {
    pub endpoint: String,
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub(crate) fn from_status(endpoint: &str, status: StatusCode) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: Some(status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        }
    }

    pub(crate) fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {code}"))
        .unwrap_or_default()
}

/// Response body did not match the schema expected for the endpoint.
#[derive(Debug, Clone, Error)]
#[error("unexpected response shape from {endpoint}: {message}")]
pub struct DecodeError {
    pub endpoint: String,
    pub message: String,
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(err) => err.status,
            ClientError::Decode(_) => None,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ClientError::Transport(err) => &err.endpoint,
            ClientError::Decode(err) => &err.endpoint,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("base url '{value}' must use http or https")]
    UnsupportedScheme { value: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
