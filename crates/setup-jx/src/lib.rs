//! setup-jx installs the jx CLI in a GitHub Actions job.
//!
//! The binary resolves the requested version (including `latest`), downloads
//! the matching release archive for the host platform, caches the extracted
//! tree, and exposes the executable to the rest of the pipeline through the
//! runner's output and path files.

pub mod cli;
pub mod pipeline;
pub mod run;
pub mod tracing;
