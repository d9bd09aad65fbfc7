//! Archive extraction for downloaded release artifacts.

use flate2::read::GzDecoder;
use setup_jx_core::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::debug;

/// Extract a gzip-compressed tarball into `dest`, creating it first.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    debug!(archive = %archive.display(), dest = %dest.display(), "Extracting tar.gz archive");
    fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(file);
    let mut tarball = tar::Archive::new(decoder);
    tarball
        .unpack(dest)
        .map_err(|e| Error::extraction(format!("failed to unpack tar.gz: {e}")))?;
    Ok(())
}

/// Extract a zip archive into `dest`, honoring stored unix mode bits.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    debug!(archive = %archive.display(), dest = %dest.display(), "Extracting zip archive");
    fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| Error::extraction(format!("failed to open zip: {e}")))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| Error::extraction(format!("failed to read zip entry: {e}")))?;

        // Entries escaping the destination are skipped, not an error.
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    /// Builds a tar.gz containing `jx` (mode 755) and `README.md`.
    fn build_tar_gz(path: &Path) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut header = tar::Header::new_gnu();
        header.set_size(10);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, "jx", &b"#!/bin/sh\n"[..])
            .unwrap();

        let mut header = tar::Header::new_gnu();
        header.set_size(5);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "README.md", &b"docs\n"[..])
            .unwrap();

        builder.into_inner().unwrap().finish().unwrap();
    }

    /// Builds a zip containing `jx.exe` under a folder.
    fn build_zip(path: &Path) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        writer.add_directory("bin/", options).unwrap();
        writer.start_file("bin/jx.exe", options).unwrap();
        writer.write_all(b"MZ fake binary").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn tar_gz_extraction_restores_the_tree() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("jx-linux-amd64.tar.gz");
        build_tar_gz(&archive);

        let dest = tmp.path().join("out");
        extract_tar_gz(&archive, &dest).unwrap();

        assert_eq!(fs::read(dest.join("jx")).unwrap(), b"#!/bin/sh\n");
        assert!(dest.join("README.md").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn tar_gz_extraction_keeps_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("jx-linux-amd64.tar.gz");
        build_tar_gz(&archive);

        let dest = tmp.path().join("out");
        extract_tar_gz(&archive, &dest).unwrap();

        let mode = fs::metadata(dest.join("jx")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn zip_extraction_restores_nested_entries() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("jx-windows-amd64.zip");
        build_zip(&archive);

        let dest = tmp.path().join("out");
        extract_zip(&archive, &dest).unwrap();

        assert_eq!(
            fs::read(dest.join("bin").join("jx.exe")).unwrap(),
            b"MZ fake binary"
        );
    }

    #[test]
    fn corrupt_archives_are_extraction_errors() {
        let tmp = TempDir::new().unwrap();
        let archive = tmp.path().join("broken.tar.gz");
        fs::write(&archive, b"not a gzip stream").unwrap();

        let err = extract_tar_gz(&archive, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));

        let archive = tmp.path().join("broken.zip");
        fs::write(&archive, b"not a zip").unwrap();

        let err = extract_zip(&archive, &tmp.path().join("out2")).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
