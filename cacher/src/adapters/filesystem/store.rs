//! Local directory snapshot store

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::SnapshotStore;
use crate::error::StoreError;

/// Writes the snapshot to `{dir}/{object}`
pub struct FsSnapshotStore {
    dir: PathBuf,
    object: String,
}

impl FsSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, object: String) -> Self {
        Self {
            dir: dir.into(),
            object,
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.join(&self.object)
    }

    /// Hidden sibling of the target, so the final rename stays in one directory
    fn staging_path(&self) -> PathBuf {
        let target = self.target_path();
        let name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.tmp", name))
    }
}

#[async_trait]
impl SnapshotStore for FsSnapshotStore {
    async fn commit(&self, payload: &[u8]) -> Result<(), StoreError> {
        let target = self.target_path();
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Readers never see a half-written page
        let tmp = self.staging_path();
        tokio::fs::write(&tmp, payload).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(
            path = %target.display(),
            bytes = payload.len(),
            "Wrote snapshot"
        );
        Ok(())
    }
}
