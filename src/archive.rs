//! Encrypted bundling of run artifacts
//!
//! Produces a traditional (ZipCrypto) password-protected ZIP. Entry metadata is
//! pinned so the same inputs and password always give the same bytes.

use crate::error::{ArchiveError, Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::unstable::write::FileOptionsExt;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Permissions recorded for every entry
const ENTRY_PERMISSIONS: u32 = 0o644;

/// Writes password-protected ZIP bundles
#[derive(Clone, Copy, Debug)]
pub struct Archiver {
    compression_level: i32,
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Archiver {
    /// Create an archiver with a fixed deflate level (0-9)
    pub fn new(compression_level: i32) -> Self {
        Self {
            compression_level: compression_level.clamp(0, 9),
        }
    }

    /// Bundle `files` into an encrypted ZIP at `archive_path`
    ///
    /// Entries are stored under their file names, in the given order. The
    /// archive is only created once every input has been checked.
    pub fn bundle(
        &self,
        files: &[PathBuf],
        password: &str,
        archive_path: &Path,
    ) -> Result<PathBuf> {
        if password.is_empty() {
            return Err(ArchiveError::EmptyPassword.into());
        }

        for path in files {
            if !path.is_file() {
                return Err(ArchiveError::MissingFile { path: path.clone() }.into());
            }
        }

        debug!(
            ?archive_path,
            file_count = files.len(),
            compression_level = self.compression_level,
            "Creating encrypted archive"
        );

        let write_failed = |e: &dyn std::fmt::Display| {
            Error::Archive(ArchiveError::WriteFailed {
                archive: archive_path.to_path_buf(),
                reason: e.to_string(),
            })
        };

        let output = std::fs::File::create(archive_path).map_err(|e| write_failed(&e))?;
        let mut writer = ZipWriter::new(output);

        for path in files {
            let name = entry_name(path)?;
            let contents = std::fs::read(path)?;

            writer
                .start_file(name.as_str(), self.entry_options(password))
                .map_err(|e| write_failed(&e))?;
            writer.write_all(&contents).map_err(|e| write_failed(&e))?;
            debug!(entry = %name, bytes = contents.len(), "Added archive entry");
        }

        writer.finish().map_err(|e| write_failed(&e))?;

        info!(?archive_path, file_count = files.len(), "Archive created");
        Ok(archive_path.to_path_buf())
    }

    fn entry_options(&self, password: &str) -> FileOptions {
        FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .last_modified_time(DateTime::default())
            .unix_permissions(ENTRY_PERMISSIONS)
            .with_deprecated_encryption(password.as_bytes())
    }
}

/// File name component of `path`, used as the entry name
fn entry_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ArchiveError::MissingFile {
            path: path.to_path_buf(),
        })
        .map_err(Error::from)
}
