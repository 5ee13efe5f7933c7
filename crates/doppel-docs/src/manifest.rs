// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed manifest of profile documents the twin is grounded on.

/// How a manifest entry's bytes are turned into corpus text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// UTF-8 plain text, used as-is.
    Text,
    /// JSON, parsed and re-rendered as indented key/value text.
    Json,
    /// PDF, text layer extracted page-by-page.
    Pdf,
}

/// One named profile document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSpec {
    /// Storage key under either backend.
    pub key: &'static str,
    /// Section label written above the document text in the corpus.
    pub label: &'static str,
    pub kind: DocumentKind,
}

/// The profile corpus, in the order sections appear in the assembled
/// context: communication style, professional summary, structured facts,
/// then the resume documents.
pub const PROFILE_MANIFEST: &[DocumentSpec] = &[
    DocumentSpec {
        key: "style.txt",
        label: "Communication Style",
        kind: DocumentKind::Text,
    },
    DocumentSpec {
        key: "summary.txt",
        label: "Professional Summary",
        kind: DocumentKind::Text,
    },
    DocumentSpec {
        key: "facts.json",
        label: "Structured Facts",
        kind: DocumentKind::Json,
    },
    DocumentSpec {
        key: "resume.pdf",
        label: "Resume",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume2.pdf",
        label: "Resume Document 2",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume3.pdf",
        label: "Resume Document 3",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume4.pdf",
        label: "Resume Document 4",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume5.pdf",
        label: "Resume Document 5",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume6.pdf",
        label: "Resume Document 6",
        kind: DocumentKind::Pdf,
    },
    DocumentSpec {
        key: "resume7.pdf",
        label: "Resume Document 7",
        kind: DocumentKind::Pdf,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_has_three_core_documents_and_seven_resumes() {
        assert_eq!(PROFILE_MANIFEST.len(), 10);
        let pdfs = PROFILE_MANIFEST
            .iter()
            .filter(|d| d.kind == DocumentKind::Pdf)
            .count();
        assert_eq!(pdfs, 7);
        assert_eq!(PROFILE_MANIFEST[0].key, "style.txt");
        assert_eq!(PROFILE_MANIFEST[2].kind, DocumentKind::Json);
    }
}
