// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles the profile document corpus supplied to the model.
//!
//! For each manifest entry the assembler walks an ordered backend chain
//! (remote store first when configured, local filesystem second). Absence
//! moves on to the next backend; any other failure is logged and the
//! document is skipped. One document's failure never aborts the rest.
//! The corpus is re-derived on every request; nothing is cached.

use std::sync::Arc;

use tracing::{debug, warn};

use doppel_core::DoppelError;
use doppel_storage::ObjectStore;

use crate::manifest::{DocumentKind, DocumentSpec, PROFILE_MANIFEST};
use crate::pdf::extract_pdf_text;

/// Returned when no profile document can be loaded from any backend.
pub const PLACEHOLDER_CORPUS: &str = "Professional with experience in software development, \
cloud architecture, and AI/ML. Skills include systems programming, distributed services, \
and modern DevOps practices.";

/// The assembled corpus plus how many manifest documents contributed.
#[derive(Debug, Clone)]
pub struct AssembledCorpus {
    /// Concatenated labeled sections, or [`PLACEHOLDER_CORPUS`].
    pub text: String,
    /// Number of documents that loaded successfully.
    pub loaded: usize,
}

/// Snapshot of document availability for the health endpoint.
#[derive(Debug, Clone)]
pub struct DocumentInventory {
    /// Manifest documents currently fetchable from some backend.
    pub found: usize,
    /// Label of the backend serving them ("remote" or "local").
    pub source: &'static str,
}

/// Loads and concatenates the profile documents.
#[derive(Clone)]
pub struct DocumentAssembler {
    backends: Vec<Arc<dyn ObjectStore>>,
}

impl DocumentAssembler {
    /// Creates an assembler over an ordered backend chain. The first
    /// backend that yields a document wins for that document.
    pub fn new(backends: Vec<Arc<dyn ObjectStore>>) -> Self {
        Self { backends }
    }

    /// Fetches one document's bytes, walking the backend chain.
    async fn fetch(&self, key: &str) -> Option<(Vec<u8>, &'static str)> {
        for backend in &self.backends {
            match backend.get(key).await {
                Ok(Some(bytes)) => return Some((bytes, backend.label())),
                Ok(None) => continue,
                Err(e) => {
                    warn!(key, backend = backend.label(), error = %e, "document fetch failed, trying next backend");
                    continue;
                }
            }
        }
        None
    }

    /// Builds the corpus string for one completion request.
    pub async fn assemble(&self) -> AssembledCorpus {
        let mut sections = Vec::new();

        for spec in PROFILE_MANIFEST {
            let Some((bytes, source)) = self.fetch(spec.key).await else {
                debug!(key = spec.key, "profile document not present");
                continue;
            };

            match render_document(spec, &bytes) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(key = spec.key, source, len = text.len(), "loaded profile document");
                    sections.push(format!("## {}\n\n{}", spec.label, text.trim()));
                }
                Ok(_) => {
                    debug!(key = spec.key, "profile document is empty, skipping");
                }
                Err(e) => {
                    warn!(key = spec.key, error = %e, "profile document unreadable, skipping");
                }
            }
        }

        if sections.is_empty() {
            return AssembledCorpus {
                text: PLACEHOLDER_CORPUS.to_string(),
                loaded: 0,
            };
        }

        AssembledCorpus {
            loaded: sections.len(),
            text: sections.join("\n\n"),
        }
    }

    /// Counts fetchable manifest documents and reports the serving
    /// backend, for the health endpoint. Does not parse document bodies.
    pub async fn probe(&self) -> DocumentInventory {
        let mut found = 0;
        let mut source = None;

        for spec in PROFILE_MANIFEST {
            if let Some((_, label)) = self.fetch(spec.key).await {
                found += 1;
                source.get_or_insert(label);
            }
        }

        DocumentInventory {
            found,
            source: source.unwrap_or_else(|| {
                self.backends.last().map(|b| b.label()).unwrap_or("local")
            }),
        }
    }
}

/// Turns one document's bytes into corpus text per its manifest kind.
fn render_document(spec: &DocumentSpec, bytes: &[u8]) -> Result<String, DoppelError> {
    match spec.kind {
        DocumentKind::Text => String::from_utf8(bytes.to_vec())
            .map_err(|e| DoppelError::Internal(format!("document is not UTF-8: {e}"))),
        DocumentKind::Json => {
            let value: serde_json::Value = serde_json::from_slice(bytes)
                .map_err(|e| DoppelError::Internal(format!("document is not valid JSON: {e}")))?;
            Ok(render_facts(&value))
        }
        DocumentKind::Pdf => extract_pdf_text(bytes),
    }
}

/// Renders structured facts as indented `key: value` text.
///
/// Top-level objects become one line per key; nested structures are
/// pretty-printed under their key.
fn render_facts(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, val)| match val {
                serde_json::Value::String(s) => format!("{key}: {s}"),
                serde_json::Value::Array(items) if items.iter().all(|i| i.is_string()) => {
                    let joined: Vec<&str> = items.iter().filter_map(|i| i.as_str()).collect();
                    format!("{key}: {}", joined.join(", "))
                }
                other => format!(
                    "{key}:\n{}",
                    serde_json::to_string_pretty(other).unwrap_or_default()
                ),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory backend with optional per-key failure injection.
    struct MemStore {
        label: &'static str,
        blobs: HashMap<&'static str, Vec<u8>>,
        failing: Vec<&'static str>,
    }

    impl MemStore {
        fn new(label: &'static str) -> Self {
            Self {
                label,
                blobs: HashMap::new(),
                failing: Vec::new(),
            }
        }

        fn with(mut self, key: &'static str, bytes: &[u8]) -> Self {
            self.blobs.insert(key, bytes.to_vec());
            self
        }

        fn failing_on(mut self, key: &'static str) -> Self {
            self.failing.push(key);
            self
        }
    }

    #[async_trait]
    impl ObjectStore for MemStore {
        fn label(&self) -> &'static str {
            self.label
        }

        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DoppelError> {
            if self.failing.contains(&key) {
                return Err(DoppelError::Storage {
                    source: "injected failure".into(),
                });
            }
            Ok(self.blobs.get(key).cloned())
        }

        async fn put(&self, _key: &str, _bytes: &[u8]) -> Result<(), DoppelError> {
            unimplemented!("read-only test store")
        }

        async fn delete(&self, _key: &str) -> Result<(), DoppelError> {
            unimplemented!("read-only test store")
        }
    }

    #[tokio::test]
    async fn nothing_loaded_yields_placeholder() {
        let assembler = DocumentAssembler::new(vec![Arc::new(MemStore::new("local"))]);
        let corpus = assembler.assemble().await;
        assert_eq!(corpus.text, PLACEHOLDER_CORPUS);
        assert_eq!(corpus.loaded, 0);
    }

    #[tokio::test]
    async fn sections_appear_in_manifest_order_with_labels() {
        let store = MemStore::new("local")
            .with("summary.txt", b"Ten years of backend work.")
            .with("style.txt", b"Concise and direct.");
        let assembler = DocumentAssembler::new(vec![Arc::new(store)]);

        let corpus = assembler.assemble().await;
        assert_eq!(corpus.loaded, 2);
        let style_at = corpus.text.find("## Communication Style").unwrap();
        let summary_at = corpus.text.find("## Professional Summary").unwrap();
        assert!(style_at < summary_at);
        assert!(corpus.text.contains("Concise and direct."));
    }

    #[tokio::test]
    async fn remote_wins_over_local_per_document() {
        let remote = MemStore::new("remote").with("style.txt", b"remote style");
        let local = MemStore::new("local")
            .with("style.txt", b"local style")
            .with("summary.txt", b"local summary");
        let assembler = DocumentAssembler::new(vec![Arc::new(remote), Arc::new(local)]);

        let corpus = assembler.assemble().await;
        assert!(corpus.text.contains("remote style"));
        assert!(!corpus.text.contains("local style"));
        assert!(corpus.text.contains("local summary"));
    }

    #[tokio::test]
    async fn backend_error_falls_through_to_next() {
        let remote = MemStore::new("remote").failing_on("style.txt");
        let local = MemStore::new("local").with("style.txt", b"still here");
        let assembler = DocumentAssembler::new(vec![Arc::new(remote), Arc::new(local)]);

        let corpus = assembler.assemble().await;
        assert!(corpus.text.contains("still here"));
    }

    #[tokio::test]
    async fn one_bad_document_does_not_abort_the_rest() {
        let store = MemStore::new("local")
            .with("facts.json", b"{ not json")
            .with("summary.txt", b"Survives.");
        let assembler = DocumentAssembler::new(vec![Arc::new(store)]);

        let corpus = assembler.assemble().await;
        assert_eq!(corpus.loaded, 1);
        assert!(corpus.text.contains("Survives."));
    }

    #[tokio::test]
    async fn facts_json_renders_as_key_value_text() {
        let store = MemStore::new("local").with(
            "facts.json",
            br#"{"name": "Jordan", "languages": ["Rust", "Python"], "years": 10}"#,
        );
        let assembler = DocumentAssembler::new(vec![Arc::new(store)]);

        let corpus = assembler.assemble().await;
        assert!(corpus.text.contains("name: Jordan"));
        assert!(corpus.text.contains("languages: Rust, Python"));
        assert!(corpus.text.contains("years:"));
    }

    #[tokio::test]
    async fn probe_counts_and_reports_source() {
        let remote = MemStore::new("remote").with("style.txt", b"x");
        let local = MemStore::new("local").with("summary.txt", b"y");
        let assembler = DocumentAssembler::new(vec![Arc::new(remote), Arc::new(local)]);

        let inventory = assembler.probe().await;
        assert_eq!(inventory.found, 2);
        assert_eq!(inventory.source, "remote");
    }

    #[tokio::test]
    async fn probe_with_nothing_found_reports_fallback_backend() {
        let assembler = DocumentAssembler::new(vec![
            Arc::new(MemStore::new("remote")),
            Arc::new(MemStore::new("local")),
        ]);
        let inventory = assembler.probe().await;
        assert_eq!(inventory.found, 0);
        assert_eq!(inventory.source, "local");
    }
}
