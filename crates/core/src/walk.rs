//! Recursive executable discovery inside extracted archive trees.

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::tool::ToolSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Walk `dir` depth-first, collecting every file whose name equals
/// `target` exactly (case-sensitive).
///
/// Entries are visited in the order the filesystem reports them, and a
/// directory is fully descended into before its later siblings. Symbolic
/// links are followed; cyclic link structures are not detected and will
/// recurse until the operating system objects.
pub fn walk_files(dir: &Path, target: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if fs::metadata(&path)?.is_dir() {
            found.extend(walk_files(&path, target)?);
        } else {
            trace!(file = %path.display(), "visited");
            if entry.file_name().to_str() == Some(target) {
                found.push(path);
            }
        }
    }
    Ok(found)
}

/// Make `path` fully permissive (mode 777). No-op on non-Unix hosts.
///
/// Archives extract with inconsistent mode bits, so both the extracted
/// root and the located executable get their permissions re-applied on
/// every run.
pub fn make_fully_permissive(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o777);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

/// Locate the tool executable under `root`.
///
/// The root itself is made fully permissive first, then the tree is
/// searched for `<name><executable extension>`. The first match in
/// traversal order wins; additional matches are ignored.
pub fn find_executable(root: &Path, spec: &ToolSpec, platform: &Platform) -> Result<PathBuf> {
    make_fully_permissive(root)?;
    let target = spec.executable_name(platform);
    debug!(root = %root.display(), %target, "Searching for executable");
    let matches = walk_files(root, &target)?;
    matches
        .into_iter()
        .next()
        .ok_or_else(|| Error::executable_not_found(spec.name.as_str(), root))
}
