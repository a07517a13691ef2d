//! Extractor registry keyed by attachment kind.

use std::collections::HashMap;
use std::sync::Arc;

use arshif_core::{AttachmentKind, Error, Result, TextExtractor};

use crate::{ImageOcrExtractor, PdfTextExtractor};

/// Maps each attachment kind to the extractor that handles it.
pub struct ExtractorSet {
    extractors: HashMap<AttachmentKind, Arc<dyn TextExtractor>>,
}

impl ExtractorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// The production pair: PDF text layer plus image OCR in the given
    /// language.
    pub fn with_defaults(ocr_language: &str) -> Self {
        let mut set = Self::new();
        set.register(Arc::new(PdfTextExtractor));
        set.register(Arc::new(ImageOcrExtractor::new(ocr_language)));
        set
    }

    /// Register an extractor. Replaces any existing one for the same kind.
    pub fn register(&mut self, extractor: Arc<dyn TextExtractor>) {
        self.extractors.insert(extractor.kind(), extractor);
    }

    /// Extract text using the extractor registered for the given kind.
    pub async fn extract(
        &self,
        kind: AttachmentKind,
        data: &[u8],
        filename: &str,
    ) -> Result<String> {
        let extractor = self.extractors.get(&kind).ok_or_else(|| {
            Error::Internal(format!("no extractor registered for kind: {kind}"))
        })?;
        extractor.extract(data, filename).await
    }

    /// Check whether an extractor is registered for the given kind.
    pub fn has_extractor(&self, kind: AttachmentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Run health checks on all registered extractors.
    pub async fn health_check_all(&self) -> HashMap<AttachmentKind, bool> {
        let mut results = HashMap::new();
        for (kind, extractor) in &self.extractors {
            let healthy = extractor.health_check().await.unwrap_or(false);
            results.insert(*kind, healthy);
        }
        results
    }
}

impl Default for ExtractorSet {
    fn default() -> Self {
        Self::with_defaults(arshif_core::defaults::OCR_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedExtractor {
        kind: AttachmentKind,
        text: &'static str,
    }

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        fn kind(&self) -> AttachmentKind {
            self.kind
        }

        async fn extract(&self, _data: &[u8], _filename: &str) -> Result<String> {
            Ok(self.text.to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn new_set_is_empty() {
        let set = ExtractorSet::new();
        assert!(!set.has_extractor(AttachmentKind::Pdf));
        assert!(!set.has_extractor(AttachmentKind::Image));
    }

    #[test]
    fn with_defaults_covers_both_kinds() {
        let set = ExtractorSet::with_defaults("ara");
        assert!(set.has_extractor(AttachmentKind::Pdf));
        assert!(set.has_extractor(AttachmentKind::Image));
    }

    #[tokio::test]
    async fn extract_dispatches_by_kind() {
        let mut set = ExtractorSet::new();
        set.register(Arc::new(FixedExtractor {
            kind: AttachmentKind::Pdf,
            text: "from pdf",
        }));
        set.register(Arc::new(FixedExtractor {
            kind: AttachmentKind::Image,
            text: "from image",
        }));

        assert_eq!(
            set.extract(AttachmentKind::Pdf, b"x", "a.pdf").await.unwrap(),
            "from pdf"
        );
        assert_eq!(
            set.extract(AttachmentKind::Image, b"x", "a.png").await.unwrap(),
            "from image"
        );
    }

    #[tokio::test]
    async fn extract_without_registered_kind_errors() {
        let set = ExtractorSet::new();
        let err = set
            .extract(AttachmentKind::Pdf, b"x", "a.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[tokio::test]
    async fn register_replaces_existing_extractor() {
        let mut set = ExtractorSet::new();
        set.register(Arc::new(FixedExtractor {
            kind: AttachmentKind::Pdf,
            text: "first",
        }));
        set.register(Arc::new(FixedExtractor {
            kind: AttachmentKind::Pdf,
            text: "second",
        }));
        assert_eq!(
            set.extract(AttachmentKind::Pdf, b"x", "a.pdf").await.unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn health_check_all_reports_every_kind() {
        let set = ExtractorSet::with_defaults("eng");
        let results = set.health_check_all().await;
        assert_eq!(results.len(), 2);
        // The in-process PDF decoder is always healthy
        assert_eq!(results.get(&AttachmentKind::Pdf), Some(&true));
    }
}
