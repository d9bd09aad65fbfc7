//! On-disk tool cache for setup-jx.
//!
//! Maps `(tool name, version)` to a directory holding that version's
//! extracted release tree. Entries are created once, on first successful
//! download, and reused on every later request for the same version;
//! nothing here evicts. Scratch space for in-flight downloads lives under
//! the same root so registering an entry is a rename, never a copy across
//! filesystems.

use setup_jx_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Directory under the cache root holding in-flight downloads.
const SCRATCH_DIR: &str = "downloads";

/// Persistent cache of extracted tool trees.
#[derive(Debug, Clone)]
pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    /// Cache rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache rooted at the runner-provided tool cache directory
    /// (`RUNNER_TOOL_CACHE`), or the user cache directory when the runner
    /// does not provide one.
    #[must_use]
    pub fn from_env() -> Self {
        let root = std::env::var_os("RUNNER_TOOL_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(default_root);
        Self::new(root)
    }

    /// Cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the entry for `(tool, version)` lives at.
    #[must_use]
    pub fn entry_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }

    /// Look up an existing entry, returning its directory on a hit.
    #[must_use]
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let path = self.entry_path(tool, version);
        if path.is_dir() {
            trace!(%tool, %version, path = %path.display(), "Tool cache hit");
            Some(path)
        } else {
            trace!(%tool, %version, "Tool cache miss");
            None
        }
    }

    /// Register `extracted` as the entry for `(tool, version)`.
    ///
    /// The tree is renamed into place; an existing entry under the same key
    /// is replaced. Returns the stable entry directory.
    pub fn store(&self, tool: &str, version: &str, extracted: &Path) -> Result<PathBuf> {
        let dest = self.entry_path(tool, version);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        if dest.exists() {
            fs::remove_dir_all(&dest)?;
        }
        fs::rename(extracted, &dest).map_err(|e| {
            Error::cache(format!(
                "failed to register {tool} {version} at {}: {e}",
                dest.display()
            ))
        })?;
        debug!(%tool, %version, path = %dest.display(), "Stored tool in cache");
        Ok(dest)
    }

    /// Scratch directory for in-flight downloads and extractions, created
    /// on demand.
    pub fn scratch_dir(&self) -> Result<PathBuf> {
        let dir = self.root.join(SCRATCH_DIR);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Default cache root under the platform user cache directory.
fn default_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("setup-jx")
        .join("tools")
}
