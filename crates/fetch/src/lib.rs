//! Tool acquisition for setup-jx.
//!
//! The [`ToolFetcher`] ties the pieces together: check the tool cache,
//! download the platform artifact on a miss, extract it, register the tree
//! in the cache, then locate the executable and make it runnable. Nothing
//! here is transactional; a failed acquisition leaves its scratch files
//! behind and the next run starts over.

pub mod extract;

use setup_jx_cache::ToolCache;
use setup_jx_core::platform::OsFamily;
use setup_jx_core::walk::{find_executable, make_fully_permissive};
use setup_jx_core::{Error, Platform, Result, ToolSpec};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Acquires tool releases: cache check, download, extract, store, locate.
pub struct ToolFetcher {
    spec: ToolSpec,
    cache: ToolCache,
    client: reqwest::Client,
}

impl ToolFetcher {
    /// Fetcher for `spec` over `cache`.
    #[must_use]
    pub fn new(spec: ToolSpec, cache: ToolCache) -> Self {
        Self {
            spec,
            cache,
            client: reqwest::Client::new(),
        }
    }

    /// Tool descriptor this fetcher acquires.
    #[must_use]
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Acquire `version` for `platform`, returning the executable path.
    ///
    /// `version` must be a concrete tag; `latest` is resolved before this
    /// point. A cache hit skips the network entirely, but the executable
    /// lookup still runs, so a corrupt cached entry fails rather than
    /// being silently re-downloaded.
    pub async fn fetch(&self, version: &str, platform: &Platform) -> Result<PathBuf> {
        let tool = self.spec.name.as_str();
        let dir = match self.cache.find(tool, version) {
            Some(cached) => {
                info!(%tool, %version, path = %cached.display(), "Using cached tool");
                cached
            }
            None => self.download_and_cache(version, platform).await?,
        };
        let executable = find_executable(&dir, &self.spec, platform)?;
        make_fully_permissive(&executable)?;
        Ok(executable)
    }

    async fn download_and_cache(&self, version: &str, platform: &Platform) -> Result<PathBuf> {
        let url = self.spec.download_url(version, platform);
        let scratch = self.cache.scratch_dir()?;
        let archive = scratch.join(format!(
            "{}.{}",
            Uuid::new_v4(),
            platform.archive_extension()
        ));

        self.download(&url, &archive).await?;
        make_fully_permissive(&archive)?;

        let extracted = scratch.join(Uuid::new_v4().to_string());
        match platform.family() {
            OsFamily::Windows => extract::extract_zip(&archive, &extracted)?,
            OsFamily::Linux | OsFamily::Darwin => extract::extract_tar_gz(&archive, &extracted)?,
        }

        self.cache.store(&self.spec.name, version, &extracted)
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(%url, "Downloading release archive");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, "setup-jx")
            .send()
            .await
            .map_err(|e| Error::download(self.spec.name.as_str(), url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(
                self.spec.name.as_str(),
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(self.spec.name.as_str(), url, e.to_string()))?;
        std::fs::write(dest, &bytes)?;
        info!(%url, bytes = bytes.len(), "Downloaded release archive");
        Ok(())
    }
}
