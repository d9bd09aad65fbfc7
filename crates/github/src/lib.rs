//! GitHub release metadata source for setup-jx.
//!
//! Queries a repository's releases through the GraphQL API. GraphQL is
//! required here: the REST releases endpoint does not expose the `isLatest`
//! flag the version resolver filters on. GraphQL also refuses anonymous
//! callers, so a missing token surfaces as an error and lets the resolver
//! degrade to its fallback version.

use async_trait::async_trait;
use serde::Deserialize;
use setup_jx_core::{Error, Release, ReleaseSource, Result, ToolSpec};
use std::sync::Arc;
use tracing::debug;

/// Supplies an API token for the release metadata query.
pub trait CredentialProvider: Send + Sync {
    /// A token usable against the GitHub API, if one is available.
    fn token(&self) -> Option<String>;
}

/// Ambient workflow credentials: `GITHUB_TOKEN`, then `GH_TOKEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
    }
}

/// Number of releases requested per query.
const RELEASE_PAGE_SIZE: u32 = 100;

/// Most recently created releases, newest first, with the flags the
/// resolver filters on.
const RELEASES_QUERY: &str = r"
query ($owner: String!, $name: String!, $count: Int!) {
  repository(owner: $owner, name: $name) {
    releases(first: $count, orderBy: { field: CREATED_AT, direction: DESC }) {
      nodes {
        tagName
        isLatest
        isDraft
        isPrerelease
      }
    }
  }
}
";

/// Release metadata source backed by the GitHub GraphQL API.
pub struct GitHubReleaseSource {
    spec: ToolSpec,
    credentials: Arc<dyn CredentialProvider>,
}

impl GitHubReleaseSource {
    /// Source for `spec`'s repository, authenticating via `credentials`.
    #[must_use]
    pub fn new(spec: ToolSpec, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { spec, credentials }
    }

    fn client(&self) -> Result<octocrab::Octocrab> {
        let token = self.credentials.token().ok_or_else(|| {
            Error::credentials("no GitHub token in environment (GITHUB_TOKEN or GH_TOKEN)")
        })?;
        octocrab::Octocrab::builder()
            .personal_token(token)
            .build()
            .map_err(|e| Error::release_query(format!("failed to build GitHub client: {e}")))
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleaseSource {
    async fn recent_releases(&self) -> Result<Vec<Release>> {
        let client = self.client()?;
        debug!(
            owner = %self.spec.owner,
            repo = %self.spec.repo,
            count = RELEASE_PAGE_SIZE,
            "Querying recent releases"
        );
        let payload = serde_json::json!({
            "query": RELEASES_QUERY,
            "variables": {
                "owner": self.spec.owner,
                "name": self.spec.repo,
                "count": RELEASE_PAGE_SIZE,
            },
        });
        let response: serde_json::Value = client
            .graphql(&payload)
            .await
            .map_err(|e| Error::release_query(format!("releases query failed: {e}")))?;
        let parsed: QueryResponse = serde_json::from_value(response)
            .map_err(|e| Error::release_query(format!("unexpected releases payload: {e}")))?;
        Ok(parsed
            .data
            .repository
            .releases
            .nodes
            .into_iter()
            .map(ReleaseNode::into_release)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: QueryData,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    repository: RepositoryNode,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    releases: ReleaseConnection,
}

#[derive(Debug, Deserialize)]
struct ReleaseConnection {
    nodes: Vec<ReleaseNode>,
}

/// One release node as the GraphQL API spells it. The prerelease flag is
/// `isPrerelease` in the schema; the camelCase rename matches it exactly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseNode {
    tag_name: String,
    is_latest: bool,
    is_draft: bool,
    is_prerelease: bool,
}

impl ReleaseNode {
    fn into_release(self) -> Release {
        Release {
            tag_name: self.tag_name,
            is_latest: self.is_latest,
            is_draft: self.is_draft,
            is_prerelease: self.is_prerelease,
        }
    }
}
