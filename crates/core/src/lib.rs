//! Core types for setup-jx.
//!
//! This crate holds everything the provider crates share: the error
//! taxonomy, host platform resolution, the tool descriptor and its release
//! artifact naming, version resolution against a pluggable release source,
//! and the recursive executable discovery used on extracted archives.

pub mod error;
pub mod platform;
pub mod tool;
pub mod version;
pub mod walk;

pub use error::{Error, Result};
pub use platform::{Arch, OsFamily, Platform};
pub use tool::ToolSpec;
pub use version::{Release, ReleaseSource, VersionResolver};
