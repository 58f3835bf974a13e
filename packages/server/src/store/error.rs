use thiserror::Error;

/// Failure taxonomy for collection and store operations.
///
/// `Unavailable` is transient (the caller may retry and should render a
/// "could not load" state, not crash); `NotFound` and `InvalidArgument`
/// are definitive answers about the request itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing collection could not be reached or failed mid-request.
    #[error("job store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    /// No document exists under the given id.
    #[error("job '{0}' not found")]
    NotFound(String),

    /// The request itself is malformed; retrying without correcting the
    /// input will fail again.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// True for transient failures where a retry could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_job() {
        let err = StoreError::NotFound("abc123".to_string());
        assert_eq!(err.to_string(), "job 'abc123' not found");
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(StoreError::Unavailable(anyhow::anyhow!("down")).is_transient());
        assert!(!StoreError::NotFound("x".into()).is_transient());
        assert!(!StoreError::InvalidArgument("empty id".into()).is_transient());
    }
}
