use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::ports::{ScratchError, ScratchStore};

/// Scratch directory on local disk. Refuses paths outside its root.
pub struct LocalScratchStore {
    root: PathBuf,
}

impl LocalScratchStore {
    pub fn new(root: PathBuf) -> Result<Self, ScratchError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn check_within_root(&self, path: &Path) -> Result<(), ScratchError> {
        if path.starts_with(&self.root) && path != self.root {
            Ok(())
        } else {
            Err(ScratchError::OutsideRoot(path.display().to_string()))
        }
    }

    async fn remove_request_dir(&self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        if parent == self.root || !parent.starts_with(&self.root) {
            return;
        }
        match tokio::fs::remove_dir(parent).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    dir = %parent.display(),
                    "Scratch directory left in place"
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl ScratchStore for LocalScratchStore {
    async fn write(&self, path: &Path, data: &[u8]) -> Result<u64, ScratchError> {
        self.check_within_root(path)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ScratchError::WriteFailed(format!("{}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(path, data)
            .await
            .map_err(|e| ScratchError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        Ok(data.len() as u64)
    }

    async fn delete(&self, path: &Path) -> Result<(), ScratchError> {
        self.check_within_root(path)?;

        let removed = match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ScratchError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(ScratchError::DeleteFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        };

        // A failed write can leave the per-request directory behind without a file.
        if !matches!(removed, Err(ScratchError::DeleteFailed(_))) {
            self.remove_request_dir(path).await;
        }

        removed
    }
}
