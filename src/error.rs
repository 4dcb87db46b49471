//! Error Types
//!
//! Failures from the remote catalog and from local storage.

use thiserror::Error;

/// Why a single request to the catalog failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Catalog request failure, tagged with what was being asked for.
///
/// Cloneable so one failure can be handed to every card waiting on the same id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to fetch catalog page at offset {offset}: {reason}")]
    ListPage { offset: u32, reason: FetchFailure },
    #[error("failed to fetch catalog item {id}: {reason}")]
    Detail { id: u32, reason: FetchFailure },
    #[error("no catalog id in reference url {0:?}")]
    InvalidReference(String),
}

#[cfg(test)]
impl FetchError {
    /// HTTP status behind this failure, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ListPage { reason: FetchFailure::Status(code), .. }
            | FetchError::Detail { reason: FetchFailure::Status(code), .. } => Some(*code),
            _ => None,
        }
    }
}

/// Local storage failures. None of these reach the user; the collection store
/// logs them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read local storage: {0}")]
    Read(String),
    #[error("stored collection is not valid: {0}")]
    Parse(String),
    #[error("failed to write local storage: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_carries_request() {
        let err = FetchError::ListPage { offset: 12, reason: FetchFailure::Status(503) };
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("offset 12"));

        let err = FetchError::Detail { id: 25, reason: FetchFailure::Network("offline".into()) };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("item 25"));
    }
}
