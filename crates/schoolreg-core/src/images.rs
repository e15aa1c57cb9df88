//! # Image Store
//!
//! Uploaded images are written under the public static directory as
//! `school_<unix-millis>.<ext>`. Files are opened with `create_new`, so an
//! existing file is never overwritten; on a name clash the stamp is bumped.

use crate::error::RegistryError;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Subdirectory of the public root holding uploaded images.
pub const IMAGE_DIR_NAME: &str = "schoolImages";

/// Prefix of every stored image filename.
pub const IMAGE_PREFIX: &str = "school_";

/// Upper bound on name-clash retries for a single save.
const MAX_NAME_ATTEMPTS: u64 = 1000;

/// Directory-backed store for uploaded images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<public_dir>/schoolImages`.
    pub fn under_public_dir(public_dir: impl AsRef<Path>) -> Self {
        Self::new(public_dir.as_ref().join(IMAGE_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a stored filename.
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Create the directory (and parents) if missing.
    pub fn ensure_dir(&self) -> Result<(), RegistryError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Write `bytes` to a fresh timestamp-named file. Returns the filename.
    pub fn save(&self, extension: &str, bytes: &[u8]) -> Result<String, RegistryError> {
        self.ensure_dir()?;

        let stamp = unix_millis();
        for offset in 0..MAX_NAME_ATTEMPTS {
            let filename = format!("{IMAGE_PREFIX}{}.{extension}", stamp.saturating_add(offset));
            let path = self.path_of(&filename);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(bytes)?;
                    file.sync_all()?;
                    return Ok(filename);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free image name near {IMAGE_PREFIX}{stamp}.{extension}"),
        )
        .into())
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
