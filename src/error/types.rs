//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for xcsnippets operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnippetError {
    /// Unrecognized flag character, or no usable arguments at all
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Creating, copying, moving or removing a file or directory failed
    #[error("Filesystem error: {message}")]
    FileSystem { message: String },

    /// The clone subprocess failed (bad URL, network, auth, missing repository)
    #[error("Repository not found: {message}")]
    RepositoryNotFound { message: String },

    /// The remote listing could not be fetched or decoded
    #[error("Remote listing error: {message}")]
    RemoteListing { message: String },

    /// Configuration file or environment override is invalid
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SnippetError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::InvalidArguments { .. } => 1,
            Self::FileSystem { .. } => 2,
            Self::RepositoryNotFound { .. } => 3,
            Self::RemoteListing { .. } => 4,
            Self::Configuration { .. } => 5,
        }
    }

    /// Create an invalid arguments error
    #[inline]
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::FileSystem {
            message: message.into(),
        }
    }

    /// Create a repository not found error
    #[inline]
    pub fn repository_not_found<S: Into<String>>(message: S) -> Self {
        Self::RepositoryNotFound {
            message: message.into(),
        }
    }

    /// Create a remote listing error
    #[inline]
    pub fn remote_listing<S: Into<String>>(message: S) -> Self {
        Self::RemoteListing {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
