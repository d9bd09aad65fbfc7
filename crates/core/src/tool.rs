//! Tool descriptor: which tool, which repository, and how its release
//! artifacts are named.

use crate::platform::Platform;

/// Describes a tool published as platform-named archives on GitHub
/// releases.
///
/// Everything here is explicit configuration handed in at construction;
/// nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Executable name inside the release archive, without extension.
    pub name: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Version used when `latest` cannot be resolved remotely.
    pub fallback_version: String,
    release_base: Option<String>,
}

impl ToolSpec {
    /// Descriptor for `owner/repo` releasing `name`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        fallback_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            repo: repo.into(),
            fallback_version: fallback_version.into(),
            release_base: None,
        }
    }

    /// Override the release download base URL. Defaults to the GitHub
    /// releases download path for `owner/repo`.
    #[must_use]
    pub fn with_release_base(mut self, base: impl Into<String>) -> Self {
        self.release_base = Some(base.into());
        self
    }

    /// Base URL release artifacts are downloaded from.
    #[must_use]
    pub fn release_base(&self) -> String {
        self.release_base.clone().unwrap_or_else(|| {
            format!(
                "https://github.com/{}/{}/releases/download",
                self.owner, self.repo
            )
        })
    }

    /// Download URL for `version` on `platform`:
    /// `<base>/<version>/<name>-<os>-<arch>.<ext>`.
    #[must_use]
    pub fn download_url(&self, version: &str, platform: &Platform) -> String {
        format!(
            "{}/{}/{}-{}.{}",
            self.release_base(),
            version,
            self.name,
            platform.artifact_slug(),
            platform.archive_extension()
        )
    }

    /// Executable file name on `platform` (`jx` on Unix, `jx.exe` on
    /// Windows).
    #[must_use]
    pub fn executable_name(&self, platform: &Platform) -> String {
        format!("{}{}", self.name, platform.executable_extension())
    }
}
