use std::fmt;

use recordgen_core::{Epoch, FailureClass, PageFailure, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        epoch: Epoch,
        page: u32,
        result: Result<Vec<Record>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport-level failures; everything else is a malformed response.
    pub fn is_network(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::InvalidEndpoint
                | FailureKind::HttpStatus(_)
                | FailureKind::Timeout
                | FailureKind::Network
        )
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<FetchError> for PageFailure {
    fn from(err: FetchError) -> Self {
        let class = if err.is_network() {
            FailureClass::Network
        } else {
            FailureClass::Protocol
        };
        PageFailure::new(class, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body is not a JSON array of records, or holds more than a page.
    Protocol,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Protocol => write!(f, "malformed response"),
        }
    }
}
