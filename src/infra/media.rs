//! Flat filesystem store for uploaded media.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Fallback when the client sends no usable file name.
const UNNAMED_UPLOAD: &str = "upload";

/// Writes uploads as `{uuid}_{file_name}` under one directory.
#[derive(Clone, Debug)]
pub struct MediaStore {
    base_dir: PathBuf,
}

impl MediaStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write `content` under a fresh unique name and return the full path.
    pub async fn save(&self, file_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.base_dir).await?;

        let path = self
            .base_dir
            .join(format!("{}_{}", Uuid::new_v4(), base_name(file_name)));
        fs::write(&path, content).await?;

        tracing::debug!("Stored {} bytes as {}", content.len(), path.display());
        Ok(path)
    }

    /// Remove a stored file; a file that is already gone is not an error.
    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Last path component of a client-supplied name, from either separator style.
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or(UNNAMED_UPLOAD)
}
