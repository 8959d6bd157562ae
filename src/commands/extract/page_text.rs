use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::backend::PdfBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    TextLayer,
    Ocr,
    OcrFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    pub page_index: usize,
    pub source: PageSource,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedText {
    pub pages: Vec<ResolvedPage>,
}

impl ResolvedText {
    pub fn joined(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(&page.text);
            text.push('\n');
        }
        text
    }

    pub fn text_layer_page_count(&self) -> usize {
        self.count_matching(|source| matches!(source, PageSource::TextLayer))
    }

    pub fn ocr_page_count(&self) -> usize {
        self.count_matching(|source| matches!(source, PageSource::Ocr))
    }

    pub fn ocr_failed_page_count(&self) -> usize {
        self.count_matching(|source| matches!(source, PageSource::OcrFailed { .. }))
    }

    pub fn warnings(&self, pdf_path: &Path) -> Vec<String> {
        self.pages
            .iter()
            .filter_map(|page| match &page.source {
                PageSource::OcrFailed { reason } => Some(format!(
                    "OCR failed for {} page {}: {}",
                    pdf_path.display(),
                    page.page_index + 1,
                    reason
                )),
                _ => None,
            })
            .collect()
    }

    fn count_matching(&self, predicate: impl Fn(&PageSource) -> bool) -> usize {
        self.pages
            .iter()
            .filter(|page| predicate(&page.source))
            .count()
    }
}

pub fn resolve_document_text(
    backend: &dyn PdfBackend,
    pdf_path: &Path,
    boundary: usize,
) -> Result<ResolvedText> {
    let page_count = backend
        .page_count(pdf_path)
        .with_context(|| format!("failed to read page count of {}", pdf_path.display()))?;

    let mut resolved = ResolvedText::default();
    for page_index in 0..boundary.min(page_count) {
        let layer_text = backend.page_text(pdf_path, page_index).with_context(|| {
            format!(
                "failed to read text layer of {} page {}",
                pdf_path.display(),
                page_index + 1
            )
        })?;

        if !layer_text.trim().is_empty() {
            resolved.pages.push(ResolvedPage {
                page_index,
                source: PageSource::TextLayer,
                text: layer_text,
            });
            continue;
        }

        info!(
            pdf = %pdf_path.display(),
            page = page_index + 1,
            "no text layer; using OCR"
        );

        match backend.ocr_page(pdf_path, page_index) {
            Ok(ocr_text) => resolved.pages.push(ResolvedPage {
                page_index,
                source: PageSource::Ocr,
                text: ocr_text,
            }),
            Err(error) => {
                let reason = format!("{error:#}");
                warn!(
                    pdf = %pdf_path.display(),
                    page = page_index + 1,
                    error = %reason,
                    "OCR failed; treating page as empty"
                );
                resolved.pages.push(ResolvedPage {
                    page_index,
                    source: PageSource::OcrFailed { reason },
                    text: String::new(),
                });
            }
        }
    }

    Ok(resolved)
}
