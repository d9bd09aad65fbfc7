//! Command-line interface for the setup-jx binary.
//!
//! Every flag doubles as an environment variable so the binary can be driven
//! straight from a GitHub Actions step, where inputs arrive as `INPUT_*`
//! variables rather than argv.

use std::path::PathBuf;

use clap::Parser;
use setup_jx_core::ToolSpec;

use crate::tracing::{LogLevel, TracingFormat};

/// Install the jx CLI and expose it to the pipeline.
///
/// `--version` selects the tool version, so the conventional version flag is
/// left out.
#[derive(Debug, Parser)]
#[command(name = "setup-jx", about, disable_version_flag = true)]
pub struct Cli {
    /// Version to install: `latest`, `X.Y.Z`, or `vX.Y.Z`.
    #[arg(long, env = "INPUT_VERSION")]
    pub version: String,

    /// Tool cache root. Defaults to the user cache directory when unset.
    #[arg(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// Executable name inside the release archive.
    #[arg(long, default_value = "jx")]
    pub tool_name: String,

    /// Owner of the release repository.
    #[arg(long, default_value = "jenkins-x")]
    pub repo_owner: String,

    /// Name of the release repository.
    #[arg(long, default_value = "jx")]
    pub repo_name: String,

    /// Version installed when `latest` cannot be resolved.
    #[arg(long, default_value = "v3.10.45")]
    pub fallback_version: String,

    /// Override the release download base URL.
    #[arg(long)]
    pub release_base: Option<String>,

    /// Log verbosity for diagnostics on stderr.
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format for diagnostics on stderr.
    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: TracingFormat,
}

impl Cli {
    /// Tool descriptor assembled from the repository flags.
    #[must_use]
    pub fn tool_spec(&self) -> ToolSpec {
        let spec = ToolSpec::new(
            self.tool_name.as_str(),
            self.repo_owner.as_str(),
            self.repo_name.as_str(),
            self.fallback_version.as_str(),
        );
        match &self.release_base {
            Some(base) => spec.with_release_base(base.as_str()),
            None => spec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setup_jx_core::{Arch, Platform};

    #[test]
    fn parses_an_explicit_version() {
        temp_env::with_vars(
            [
                ("INPUT_VERSION", None::<&str>),
                ("RUNNER_TOOL_CACHE", None::<&str>),
            ],
            || {
                let cli = Cli::try_parse_from(["setup-jx", "--version", "v1.2.3"]).unwrap();
                assert_eq!(cli.version, "v1.2.3");
                assert_eq!(cli.tool_name, "jx");
                assert_eq!(cli.repo_owner, "jenkins-x");
                assert_eq!(cli.repo_name, "jx");
                assert_eq!(cli.fallback_version, "v3.10.45");
                assert!(cli.tool_cache.is_none());
                assert!(cli.release_base.is_none());
            },
        );
    }

    #[test]
    fn version_is_required() {
        temp_env::with_var("INPUT_VERSION", None::<&str>, || {
            assert!(Cli::try_parse_from(["setup-jx"]).is_err());
        });
    }

    #[test]
    fn version_falls_back_to_the_action_input() {
        temp_env::with_var("INPUT_VERSION", Some("latest"), || {
            let cli = Cli::try_parse_from(["setup-jx"]).unwrap();
            assert_eq!(cli.version, "latest");
        });
    }

    #[test]
    fn tool_cache_reads_the_runner_env() {
        temp_env::with_vars(
            [
                ("INPUT_VERSION", Some("latest")),
                ("RUNNER_TOOL_CACHE", Some("/opt/hostedtoolcache")),
            ],
            || {
                let cli = Cli::try_parse_from(["setup-jx"]).unwrap();
                assert_eq!(cli.tool_cache, Some(PathBuf::from("/opt/hostedtoolcache")));
            },
        );
    }

    #[test]
    fn default_spec_downloads_from_the_jx_releases() {
        let cli = Cli::try_parse_from(["setup-jx", "--version", "v1.0.0"]).unwrap();
        let spec = cli.tool_spec();
        let platform = Platform::new("Linux", "x86_64");
        assert_eq!(spec.name, "jx");
        assert_eq!(
            spec.download_url("v1.0.0", &platform),
            "https://github.com/jenkins-x/jx/releases/download/v1.0.0/jx-linux-amd64.tar.gz"
        );
    }

    #[test]
    fn release_base_override_is_honored() {
        let cli = Cli::try_parse_from([
            "setup-jx",
            "--version",
            "v1.0.0",
            "--release-base",
            "http://localhost:8080/releases",
        ])
        .unwrap();
        let spec = cli.tool_spec();
        let platform = Platform::new("Darwin", "arm64");
        assert_eq!(platform.arch(), Arch::Arm64);
        assert_eq!(
            spec.download_url("v1.0.0", &platform),
            "http://localhost:8080/releases/v1.0.0/jx-darwin-arm64.tar.gz"
        );
    }

    #[test]
    fn log_flags_parse_their_value_enums() {
        let cli = Cli::try_parse_from([
            "setup-jx",
            "--version",
            "latest",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert!(matches!(cli.log_format, TracingFormat::Json));
    }
}
