use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::backend::PdfBackend;

pub const FALLBACK_BOUNDARY_PAGES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    Keyword { keyword: String, page_index: usize },
    NoMarker,
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBoundary {
    pub end_page: usize,
    pub source: BoundarySource,
}

pub fn locate_scan_boundary(
    backend: &dyn PdfBackend,
    pdf_path: &Path,
    keywords: &[String],
    max_pages_to_scan: usize,
) -> ScanBoundary {
    match scan_for_marker(backend, pdf_path, keywords, max_pages_to_scan) {
        Ok(boundary) => boundary,
        Err(error) => {
            warn!(
                pdf = %pdf_path.display(),
                error = %format!("{error:#}"),
                "failed to scan for table of contents; using fallback boundary"
            );
            ScanBoundary {
                end_page: FALLBACK_BOUNDARY_PAGES,
                source: BoundarySource::Fallback {
                    reason: format!("{error:#}"),
                },
            }
        }
    }
}

fn scan_for_marker(
    backend: &dyn PdfBackend,
    pdf_path: &Path,
    keywords: &[String],
    max_pages_to_scan: usize,
) -> Result<ScanBoundary> {
    let page_count = backend.page_count(pdf_path)?;
    let keywords = normalized_keywords(keywords);

    for page_index in 0..page_count.min(max_pages_to_scan) {
        let text = backend.page_text(pdf_path, page_index)?.to_lowercase();

        if let Some(keyword) = keywords.iter().find(|keyword| text.contains(keyword.as_str())) {
            info!(
                pdf = %pdf_path.display(),
                keyword = %keyword,
                page = page_index + 1,
                "found table of contents marker"
            );
            return Ok(ScanBoundary {
                end_page: page_index,
                source: BoundarySource::Keyword {
                    keyword: keyword.clone(),
                    page_index,
                },
            });
        }
    }

    Ok(ScanBoundary {
        end_page: page_count.min(FALLBACK_BOUNDARY_PAGES),
        source: BoundarySource::NoMarker,
    })
}

fn normalized_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .filter(|keyword| !keyword.trim().is_empty())
        .collect()
}
