use std::string::FromUtf8Error;

use thiserror::Error;

/// Unified result type for the easel crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the runtime and by user programs.
#[derive(Debug, Error)]
pub enum Error {
    /// A programmer mistake in the user program, reported at the call site.
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("helper output is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("window backend error: {0}")]
    Backend(String),
    #[error("image encoding error: {0}")]
    Image(#[from] png::EncodingError),
    #[error("update check failed: {0}")]
    Update(String),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn read_only(owner: &str, property: &str) -> Self {
        Self::Usage(format!("{}.{} is readonly", owner, property))
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_message_names_owner_and_property() {
        let err = Error::read_only("App", "group");
        assert!(err.is_usage());
        assert_eq!(err.to_string(), "App.group is readonly");
    }

    #[test]
    fn io_errors_are_not_usage_errors() {
        let err = Error::from(std::io::Error::other("pipe closed"));
        assert!(!err.is_usage());
    }
}
