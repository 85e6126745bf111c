//! Plain-text extraction from uploaded PDF documents.

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::ExtractionError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Whether the bytes look like a PDF file.
pub fn is_pdf(bytes: &[u8]) -> bool {
    // Some writers put junk before the header; readers accept it within 1 KiB.
    let window = &bytes[..bytes.len().min(1024)];
    window.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Extract the text of every page, in page order, joined with newlines.
///
/// A page that has no text, or whose text cannot be extracted, contributes an
/// empty string. Returns an empty string when no page yields any text; the
/// caller decides whether that is an error.
pub fn extract_text(document_bytes: &[u8]) -> Result<String, ExtractionError> {
    if !is_pdf(document_bytes) {
        return Err(ExtractionError::UnsupportedFormat);
    }

    let document = Document::load_mem(document_bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    // get_pages is keyed by page number, so iteration is in page order.
    let pages = document.get_pages();
    debug!("Extracting text from {} pages", pages.len());

    let texts = pages.keys().map(|&page_number| {
        document.extract_text(&[page_number]).map_err(|e| {
            warn!("Page {} yielded no text: {}", page_number, e);
            e
        })
    });

    Ok(join_pages(texts))
}

/// Join per-page extraction results, treating failures as empty pages.
/// Returns an empty string when no page has any text.
fn join_pages<I, E>(pages: I) -> String
where
    I: IntoIterator<Item = Result<String, E>>,
{
    let texts: Vec<String> = pages
        .into_iter()
        .map(|page| {
            page.map(|text| text.trim_end_matches(['\r', '\n']).to_string())
                .unwrap_or_default()
        })
        .collect();

    if texts.iter().all(|text| text.trim().is_empty()) {
        return String::new();
    }
    texts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::build_pdf;

    #[test]
    fn test_join_keeps_empty_pages_in_order() {
        let pages: Vec<Result<String, ()>> = vec![
            Ok("Hello".to_string()),
            Ok(String::new()),
            Ok("World".to_string()),
        ];
        assert_eq!(join_pages(pages), "Hello\n\nWorld");
    }

    #[test]
    fn test_join_treats_failed_page_as_empty() {
        let pages: Vec<Result<String, &str>> = vec![
            Ok("Hello\n".to_string()),
            Err("broken content stream"),
            Ok("World\n".to_string()),
        ];
        assert_eq!(join_pages(pages), "Hello\n\nWorld");
    }

    #[test]
    fn test_join_all_empty_is_blank() {
        let pages: Vec<Result<String, ()>> = vec![Ok(String::new()), Ok(String::new())];
        assert_eq!(join_pages(pages), "");

        let pages: Vec<Result<String, &str>> = vec![Ok("\n".to_string()), Err("unreadable")];
        assert_eq!(join_pages(pages), "");
    }

    #[test]
    fn test_extract_text_from_pdf() {
        let bytes = build_pdf(&["Hello", "", "World"]);
        assert_eq!(extract_text(&bytes).unwrap(), "Hello\n\nWorld");
    }

    #[test]
    fn test_extract_text_without_any_text() {
        let bytes = build_pdf(&["", ""]);
        assert_eq!(extract_text(&bytes).unwrap(), "");
    }

    #[test]
    fn test_rejects_non_pdf() {
        assert_eq!(
            extract_text(b"PK\x03\x04 not a pdf"),
            Err(ExtractionError::UnsupportedFormat)
        );
    }

    #[test]
    fn test_rejects_corrupt_pdf() {
        let err = extract_text(b"%PDF-1.5\n garbage").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }
}
