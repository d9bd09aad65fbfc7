//! Top-level run flow: resolve, acquire, expose.

use std::path::PathBuf;
use std::sync::Arc;

use setup_jx_cache::ToolCache;
use setup_jx_core::{Platform, Result, VersionResolver};
use setup_jx_fetch::ToolFetcher;
use setup_jx_github::{EnvCredentials, GitHubReleaseSource};
use tracing::info;

use crate::cli::Cli;
use crate::pipeline;

/// Resolve the requested version, make the executable available, and record
/// it for the rest of the job.
///
/// Returns the located executable path. Errors bubble up to `main`, which
/// reports them to the runner; nothing in here prints its own failure.
pub async fn run(cli: &Cli) -> Result<PathBuf> {
    let spec = cli.tool_spec();
    let tool = spec.name.clone();
    let platform = Platform::current();

    let source = GitHubReleaseSource::new(spec.clone(), Arc::new(EnvCredentials));
    let resolver = VersionResolver::new(Arc::new(source), spec.fallback_version.clone());
    let version = resolver.resolve(&cli.version).await;

    let cache = match &cli.tool_cache {
        Some(root) => ToolCache::new(root),
        None => ToolCache::from_env(),
    };

    pipeline::start_group(&format!("Downloading {tool} {version}"));
    let fetcher = ToolFetcher::new(spec, cache);
    let executable = fetcher.fetch(&version, &platform).await?;
    pipeline::end_group();

    if let Some(dir) = executable.parent() {
        pipeline::add_path(dir);
    }

    info!(version = %version, path = %executable.display(), "Tool ready");
    pipeline::info(&format!(
        "{tool} tool version '{version}' has been cached at {}",
        executable.display()
    ));
    pipeline::set_output("jx-path", &executable.display().to_string())?;

    Ok(executable)
}
