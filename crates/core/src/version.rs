//! Version normalization and `latest` resolution.
//!
//! `latest` is resolved against a pluggable [`ReleaseSource`]; everything
//! else is plain string normalization. Resolution never fails: any problem
//! talking to the source degrades to the configured fallback version.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sentinel version string that triggers remote resolution.
pub const LATEST: &str = "latest";

/// A single release as reported by the metadata source, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Git tag of the release, e.g. `v3.10.45`.
    pub tag_name: String,
    /// Marked as the repository's latest release.
    pub is_latest: bool,
    /// Draft release, not publicly visible.
    pub is_draft: bool,
    /// Marked as a prerelease.
    pub is_prerelease: bool,
}

/// Source of recent release metadata for a repository.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// The most recently created releases, ordered newest first.
    async fn recent_releases(&self) -> Result<Vec<Release>>;
}

/// Prefix a bare version string with `v`.
///
/// Always prepends. Callers gate on the input not already carrying the
/// prefix; passing `v1.2.3` through here yields `vv1.2.3`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    format!("v{raw}")
}

/// Resolves a requested version string to a concrete release tag.
pub struct VersionResolver {
    source: Arc<dyn ReleaseSource>,
    fallback: String,
}

impl VersionResolver {
    /// Resolver over `source`, degrading to `fallback` when `latest`
    /// cannot be resolved remotely.
    pub fn new(source: Arc<dyn ReleaseSource>, fallback: impl Into<String>) -> Self {
        Self {
            source,
            fallback: fallback.into(),
        }
    }

    /// Resolve `requested` to a concrete tag.
    ///
    /// Bare versions get the `v` prefix; the string `latest` is resolved
    /// through the release source. The prefix step runs first and skips
    /// only the exact lowercase sentinel, so `Latest` becomes the literal
    /// tag `vLatest` rather than triggering resolution.
    pub async fn resolve(&self, requested: &str) -> String {
        let mut version = requested.to_string();
        if version != LATEST && !version.starts_with('v') {
            version = normalize(&version);
        }
        if version.eq_ignore_ascii_case(LATEST) {
            version = self.resolve_latest().await;
        }
        version
    }

    /// Pick the newest qualifying release tag, or the fallback.
    ///
    /// Qualifying: tag without the substring `rc`, flagged as the latest
    /// release, not a draft, not a prerelease.
    pub async fn resolve_latest(&self) -> String {
        let releases = match self.source.recent_releases().await {
            Ok(releases) => releases,
            Err(error) => {
                warn!(
                    %error,
                    fallback = %self.fallback,
                    "Failed to fetch releases, using fallback version"
                );
                return self.fallback.clone();
            }
        };

        for release in &releases {
            if !release.tag_name.contains("rc")
                && release.is_latest
                && !release.is_draft
                && !release.is_prerelease
            {
                debug!(tag = %release.tag_name, "Resolved latest release");
                return release.tag_name.clone();
            }
        }

        warn!(
            fallback = %self.fallback,
            "No qualifying release found, using fallback version"
        );
        self.fallback.clone()
    }
}
