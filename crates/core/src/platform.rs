//! Host platform resolution.
//!
//! Release artifacts are named after an OS family slug and an architecture
//! bucket. The executable extension is decided separately, by matching the
//! raw OS type string against a `Win` prefix, so the descriptor keeps the
//! raw string around instead of collapsing it into the family enum.

use std::fmt;

/// Operating system family used in release artifact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Linux distributions.
    Linux,
    /// macOS.
    Darwin,
    /// Windows, also the fallback for unrecognized OS type strings.
    Windows,
}

impl OsFamily {
    /// Classify an OS type string (`Linux`, `Darwin`, `Windows_NT`, ...).
    ///
    /// Anything unrecognized falls back to `Windows`, matching the default
    /// branch of the artifact naming scheme.
    #[must_use]
    pub fn from_type_str(os_type: &str) -> Self {
        match os_type {
            "Linux" => Self::Linux,
            "Darwin" => Self::Darwin,
            _ => Self::Windows,
        }
    }

    /// Slug used in release artifact names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Windows => "windows",
        }
    }

    /// Archive extension of this family's release artifacts.
    #[must_use]
    pub const fn archive_extension(self) -> &'static str {
        match self {
            Self::Windows => "zip",
            Self::Linux | Self::Darwin => "tar.gz",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// CPU architecture bucket. Artifacts only distinguish arm64 from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit ARM.
    Arm64,
    /// Everything else; artifacts are published as amd64.
    Amd64,
}

impl Arch {
    /// Bucket a raw architecture string.
    #[must_use]
    pub fn from_arch_str(arch: &str) -> Self {
        match arch {
            "arm64" | "aarch64" => Self::Arm64,
            _ => Self::Amd64,
        }
    }

    /// Slug used in release artifact names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Host platform descriptor: raw OS type string plus architecture bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os_type: String,
    arch: Arch,
}

impl Platform {
    /// Build a descriptor from a raw OS type string and architecture string.
    #[must_use]
    pub fn new(os_type: impl Into<String>, arch: &str) -> Self {
        Self {
            os_type: os_type.into(),
            arch: Arch::from_arch_str(arch),
        }
    }

    /// Detect the current host platform.
    #[must_use]
    pub fn current() -> Self {
        Self::new(host_os_type(), std::env::consts::ARCH)
    }

    /// Raw OS type string (`Linux`, `Darwin`, `Windows_NT`, ...).
    #[must_use]
    pub fn os_type(&self) -> &str {
        &self.os_type
    }

    /// OS family used for artifact naming.
    #[must_use]
    pub fn family(&self) -> OsFamily {
        OsFamily::from_type_str(&self.os_type)
    }

    /// Architecture bucket.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }

    /// Executable file extension: `.exe` iff the OS type string starts with
    /// `Win` (`Windows_NT` qualifies), empty otherwise.
    #[must_use]
    pub fn executable_extension(&self) -> &'static str {
        if self.os_type.starts_with("Win") {
            ".exe"
        } else {
            ""
        }
    }

    /// Archive extension of this platform's release artifact.
    #[must_use]
    pub fn archive_extension(&self) -> &'static str {
        self.family().archive_extension()
    }

    /// Platform segment of the artifact name, e.g. `linux-arm64`.
    ///
    /// Windows artifacts are only published for amd64, so the Windows
    /// family pins the architecture slug.
    #[must_use]
    pub fn artifact_slug(&self) -> String {
        match (self.family(), self.arch) {
            (OsFamily::Windows, _) => "windows-amd64".to_string(),
            (family, arch) => format!("{family}-{arch}"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family(), self.arch)
    }
}

/// OS type string of the current host, in the style the artifact naming
/// matches against (`uname -s` on Unix, `Windows_NT` on Windows).
fn host_os_type() -> &'static str {
    if cfg!(target_os = "linux") {
        "Linux"
    } else if cfg!(target_os = "macos") {
        "Darwin"
    } else if cfg!(target_os = "windows") {
        "Windows_NT"
    } else {
        std::env::consts::OS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_extension_is_exe_for_win_prefixed_os_types() {
        for os_type in ["Windows_NT", "Windows", "Win32"] {
            let platform = Platform::new(os_type, "x86_64");
            assert_eq!(platform.executable_extension(), ".exe", "{os_type}");
        }
    }

    #[test]
    fn executable_extension_is_empty_elsewhere() {
        for os_type in ["Linux", "Darwin", "SunOS", "FreeBSD", ""] {
            let platform = Platform::new(os_type, "x86_64");
            assert_eq!(platform.executable_extension(), "", "{os_type}");
        }
    }

    #[test]
    fn family_classification_with_windows_fallback() {
        assert_eq!(OsFamily::from_type_str("Linux"), OsFamily::Linux);
        assert_eq!(OsFamily::from_type_str("Darwin"), OsFamily::Darwin);
        assert_eq!(OsFamily::from_type_str("Windows_NT"), OsFamily::Windows);
        // Unknown OS type strings fall into the Windows branch.
        assert_eq!(OsFamily::from_type_str("SunOS"), OsFamily::Windows);
        assert_eq!(OsFamily::from_type_str(""), OsFamily::Windows);
    }

    #[test]
    fn arch_buckets() {
        assert_eq!(Arch::from_arch_str("arm64"), Arch::Arm64);
        assert_eq!(Arch::from_arch_str("aarch64"), Arch::Arm64);
        assert_eq!(Arch::from_arch_str("x86_64"), Arch::Amd64);
        assert_eq!(Arch::from_arch_str("x64"), Arch::Amd64);
        assert_eq!(Arch::from_arch_str("ppc64"), Arch::Amd64);
    }

    #[test]
    fn archive_extension_per_family() {
        assert_eq!(Platform::new("Linux", "x86_64").archive_extension(), "tar.gz");
        assert_eq!(Platform::new("Darwin", "arm64").archive_extension(), "tar.gz");
        assert_eq!(Platform::new("Windows_NT", "x86_64").archive_extension(), "zip");
    }

    #[test]
    fn display_is_slug_pair() {
        assert_eq!(Platform::new("Linux", "aarch64").to_string(), "linux-arm64");
        assert_eq!(Platform::new("Darwin", "x86_64").to_string(), "darwin-amd64");
        assert_eq!(
            Platform::new("Windows_NT", "arm64").to_string(),
            "windows-arm64"
        );
    }

    #[test]
    fn artifact_slug_pins_windows_to_amd64() {
        assert_eq!(Platform::new("Linux", "arm64").artifact_slug(), "linux-arm64");
        assert_eq!(Platform::new("Linux", "x86_64").artifact_slug(), "linux-amd64");
        assert_eq!(Platform::new("Darwin", "arm64").artifact_slug(), "darwin-arm64");
        assert_eq!(Platform::new("Darwin", "x86_64").artifact_slug(), "darwin-amd64");
        assert_eq!(
            Platform::new("Windows_NT", "arm64").artifact_slug(),
            "windows-amd64"
        );
        assert_eq!(
            Platform::new("Windows_NT", "x86_64").artifact_slug(),
            "windows-amd64"
        );
    }

    #[test]
    fn current_host_is_detectable() {
        let platform = Platform::current();
        assert!(!platform.os_type().is_empty());
        // The descriptor must always produce a usable artifact name.
        assert!(!platform.archive_extension().is_empty());
    }
}
