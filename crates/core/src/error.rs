//! Error types for setup-jx operations

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the setup-jx crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, downloading, and caching a tool.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// No usable credentials for the release metadata query.
    #[error("GitHub token not available: {0}")]
    #[diagnostic(
        code(setup_jx::credentials),
        help("set GITHUB_TOKEN (or GH_TOKEN) in the workflow environment")
    )]
    Credentials(String),

    /// The release metadata query failed.
    #[error("release query failed: {0}")]
    #[diagnostic(code(setup_jx::release_query))]
    ReleaseQuery(String),

    /// Downloading a release archive failed.
    #[error("failed to download {tool} from {url}: {reason}")]
    #[diagnostic(
        code(setup_jx::download),
        help("check that the release exists and the runner has network access")
    )]
    Download {
        /// Tool being downloaded.
        tool: String,
        /// Exact URL that was attempted.
        url: String,
        /// Underlying failure text.
        reason: String,
    },

    /// Unpacking a downloaded archive failed.
    #[error("failed to extract archive: {0}")]
    #[diagnostic(code(setup_jx::extract))]
    Extraction(String),

    /// The expected executable was absent from a cached tool tree.
    #[error("{tool} executable not found in path {}", path.display())]
    #[diagnostic(
        code(setup_jx::executable_not_found),
        help("the cached entry may be corrupt; clear the tool cache and re-run")
    )]
    ExecutableNotFound {
        /// Executable that was searched for.
        tool: String,
        /// Directory that was searched.
        path: PathBuf,
    },

    /// Tool cache lookup or registration failed.
    #[error("tool cache error: {0}")]
    #[diagnostic(code(setup_jx::cache))]
    Cache(String),

    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    #[diagnostic(code(setup_jx::io))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Missing or unusable credentials.
    #[must_use]
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials(message.into())
    }

    /// Failed release metadata query.
    #[must_use]
    pub fn release_query(message: impl Into<String>) -> Self {
        Self::ReleaseQuery(message.into())
    }

    /// Failed archive download for `tool` at `url`.
    #[must_use]
    pub fn download(
        tool: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Download {
            tool: tool.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Failed archive extraction.
    #[must_use]
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Executable missing under `path`.
    #[must_use]
    pub fn executable_not_found(tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ExecutableNotFound {
            tool: tool.into(),
            path: path.into(),
        }
    }

    /// Tool cache failure.
    #[must_use]
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache(message.into())
    }
}
