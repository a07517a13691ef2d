//! PDF text-layer extraction using `lopdf`.

use async_trait::async_trait;
use lopdf::Document;
use tracing::{debug, warn};

use arshif_core::{AttachmentKind, Error, Result, TextExtractor};

/// Extracts the text layer of a PDF, page by page in page order, joining
/// pages with a newline. Pages whose text layer cannot be decoded are
/// skipped with a warning rather than failing the whole document.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    fn kind(&self) -> AttachmentKind {
        AttachmentKind::Pdf
    }

    async fn extract(&self, data: &[u8], filename: &str) -> Result<String> {
        if data.is_empty() {
            return Err(Error::Extraction(
                "cannot extract text from empty PDF data".to_string(),
            ));
        }

        // Validate PDF magic bytes (%PDF)
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::Extraction(format!(
                "file '{filename}' is not a valid PDF (missing %PDF header)"
            )));
        }

        let doc = Document::load_mem(data)
            .map_err(|e| Error::Extraction(format!("failed to parse PDF '{filename}': {e}")))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!(filename, pages = page_numbers.len(), "extracting PDF text layer");

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            match doc.extract_text(&[number]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    warn!(filename, page = number, error = %e, "page text layer unreadable, skipping");
                    pages.push(String::new());
                }
            }
        }

        Ok(pages.join("\n").trim_end().to_string())
    }

    async fn health_check(&self) -> Result<bool> {
        // In-process decoder, always available.
        Ok(true)
    }

    fn name(&self) -> &str {
        "pdf_text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a one-page PDF containing the given line of text.
    fn pdf_with_text(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn kind_and_name() {
        let extractor = PdfTextExtractor;
        assert_eq!(extractor.kind(), AttachmentKind::Pdf);
        assert_eq!(extractor.name(), "pdf_text");
    }

    #[tokio::test]
    async fn health_check_is_always_ok() {
        assert!(PdfTextExtractor.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let err = PdfTextExtractor.extract(b"", "empty.pdf").await.unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn rejects_non_pdf_input() {
        let err = PdfTextExtractor
            .extract(b"not a pdf at all", "bad.pdf")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a valid PDF"));
    }

    #[tokio::test]
    async fn rejects_truncated_pdf() {
        // Valid header, garbage body
        let result = PdfTextExtractor.extract(b"%PDF-1.4\ngarbage", "torn.pdf").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn extracts_text_layer() {
        let bytes = pdf_with_text("Hello World");
        let text = PdfTextExtractor.extract(&bytes, "hello.pdf").await.unwrap();
        assert!(
            text.contains("Hello World"),
            "expected text layer in output, got: {text:?}"
        );
    }

    #[tokio::test]
    async fn output_has_no_trailing_whitespace() {
        let bytes = pdf_with_text("Trim me");
        let text = PdfTextExtractor.extract(&bytes, "trim.pdf").await.unwrap();
        assert_eq!(text, text.trim_end());
    }
}
