use std::sync::Arc;

use parse_display::Display;

use super::{EnvelopeViolation, ErrorObject};

/// Failure of a single fetch, normalized so that it can be stored by a cache engine.
///
/// The [`Display`](std::fmt::Display) output is the human-readable message:
/// the raw response body for [`Error::Status`] and the server supplied message for
/// [`Error::Protocol`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("{body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
    #[error("{0}")]
    Parse(Arc<serde_json::Error>),
    #[error("{}", .0.message)]
    Protocol(ErrorObject),
    #[error("{0}")]
    Envelope(EnvelopeViolation),
    #[error("unsupported JSON-RPC version `{0}`")]
    Version(String),
    #[error("`result` does not match the expected type: {0}")]
    ResultType(Arc<serde_json::Error>),
    #[error("failed to serialize request: {0}")]
    Serialize(Arc<serde_json::Error>),
}

impl Error {
    pub fn transport(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(e))
    }
    pub(crate) fn parse(e: serde_json::Error) -> Self {
        Self::Parse(Arc::new(e))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { .. } | Self::Transport(_) | Self::Parse(_) | Self::Serialize(_) => {
                ErrorKind::Transport
            }
            Self::Protocol(_) | Self::Envelope(_) | Self::Version(_) | Self::ResultType(_) => {
                ErrorKind::Protocol
            }
        }
    }
    pub fn message(&self) -> String {
        self.to_string()
    }
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(style = "snake_case")]
pub enum ErrorKind {
    /// The HTTP exchange failed or returned something other than a JSON document.
    Transport,
    /// The server answered with a JSON-RPC error or a malformed envelope.
    Protocol,
}

/// The fetch was cancelled before it produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("request aborted")]
pub struct Aborted;

pub type Result<T, E = Error> = std::result::Result<T, E>;
