//! # arshif-extract
//!
//! Text extraction adapters for archive attachments.
//!
//! Two extractors exist, one per attachment kind: the PDF extractor reads
//! the document's text layer in-process, the image extractor shells out to
//! `tesseract`. Both are best-effort — the controller converts failures into
//! an empty result and a user-facing warning, never a failed save.

pub mod image_ocr;
pub mod pdf_text;
pub mod set;

pub use image_ocr::ImageOcrExtractor;
pub use pdf_text::PdfTextExtractor;
pub use set::ExtractorSet;
