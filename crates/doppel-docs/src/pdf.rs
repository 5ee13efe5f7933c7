// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PDF text-layer extraction.

use doppel_core::DoppelError;

/// Extracts the text layer of a PDF, page by page, concatenated with
/// newlines. PDFs without a text layer yield an empty string rather than
/// an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, DoppelError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| DoppelError::Internal(format!(
        "failed to parse PDF: {e}"
    )))?;

    let mut pages = Vec::new();
    for (page_number, _) in doc.get_pages() {
        match doc.extract_text(&[page_number]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                tracing::debug!(page = page_number, error = %e, "no extractable text on page");
            }
        }
    }

    Ok(pages.join("\n"))
}
