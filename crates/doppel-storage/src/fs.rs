// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local-filesystem object store.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use doppel_core::DoppelError;

use crate::store::ObjectStore;

/// Object store backed by a directory on local disk.
///
/// Keys map directly to paths under the root; key segments are created as
/// subdirectories on write.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at `root`. The directory is created lazily
    /// on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    fn label(&self) -> &'static str {
        "local"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoppelError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DoppelError::Storage {
                source: Box::new(e),
            }),
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DoppelError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DoppelError::Storage {
                    source: Box::new(e),
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DoppelError::Storage {
                source: Box::new(e),
            })?;
        debug!(path = %path.display(), "wrote local blob");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DoppelError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DoppelError::Storage {
                source: Box::new(e),
            }),
        }
    }
}
