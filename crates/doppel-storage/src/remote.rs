// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote object store speaking S3-style path-addressed HTTP.
//!
//! Objects live at `{endpoint}/{bucket}/{key}` and are manipulated with
//! plain GET/PUT/DELETE. An optional bearer token covers stores fronted
//! by a token-checking proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use doppel_core::DoppelError;

use crate::store::ObjectStore;

/// Timeout for a single object-store round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Object store backed by an S3-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObjectStore {
    /// Creates a store addressing `{endpoint}/{bucket}`.
    pub fn new(
        endpoint: &str,
        bucket: &str,
        token: Option<&str>,
    ) -> Result<Self, DoppelError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| DoppelError::Config(format!("invalid storage token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DoppelError::Storage {
                source: Box::new(e),
            })?;

        Ok(Self {
            client,
            base_url: format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
        })
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn label(&self) -> &'static str {
        "remote"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoppelError> {
        let response = self
            .client
            .get(self.url_for(key))
            .send()
            .await
            .map_err(|e| DoppelError::Storage {
                source: Box::new(e),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response.bytes().await.map_err(|e| DoppelError::Storage {
                    source: Box::new(e),
                })?;
                debug!(key, len = bytes.len(), "fetched remote blob");
                Ok(Some(bytes.to_vec()))
            }
            status => Err(DoppelError::Storage {
                source: format!("object store GET {key} returned {status}").into(),
            }),
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), DoppelError> {
        let response = self
            .client
            .put(self.url_for(key))
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| DoppelError::Storage {
                source: Box::new(e),
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(key, len = bytes.len(), "wrote remote blob");
            Ok(())
        } else {
            Err(DoppelError::Storage {
                source: format!("object store PUT {key} returned {status}").into(),
            })
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DoppelError> {
        let response = self
            .client
            .delete(self.url_for(key))
            .send()
            .await
            .map_err(|e| DoppelError::Storage {
                source: Box::new(e),
            })?;

        let status = response.status();
        // Deleting an absent key is not an error.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(DoppelError::Storage {
                source: format!("object store DELETE {key} returned {status}").into(),
            })
        }
    }
}
