// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The object-store trait implemented by storage backends.

use async_trait::async_trait;

use doppel_core::DoppelError;

/// A keyed blob store.
///
/// `get` distinguishes "absent" (`Ok(None)`) from "failed" (`Err`), so
/// callers can walk an ordered backend chain without treating a missing
/// key as a fault.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short backend label for logs and /health ("remote" or "local").
    fn label(&self) -> &'static str;

    /// Fetches the blob under `key`, or `None` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoppelError>;

    /// Writes the blob under `key`, replacing any existing value.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DoppelError>;

    /// Removes the blob under `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DoppelError>;
}
