use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::audit::ChangeLog;
use crate::cli::ExtractArgs;
use crate::config::ExtractorConfig;
use crate::model::{BatchSummary, CompanyRecord, ContactRecord, DocumentStage};
use crate::util::{ensure_directory, file_stem_string, now_local_string, run_stamp, sha256_file};

use super::backend::{PdfBackend, PopplerBackend};
use super::boundary::locate_scan_boundary;
use super::csv_output::{render_csv, write_csv_file};
use super::fields::FieldExtractor;
use super::page_text::resolve_document_text;
use super::records::{build_company_record, build_contact_records};

pub fn run(args: ExtractArgs) -> Result<()> {
    let started = Local::now();
    let config = ExtractorConfig::load_for_extract(&args)?;

    ensure_directory(&config.input_dir)?;
    ensure_directory(&config.output_dir)?;
    info!(path = %config.input_dir.display(), "input folder");
    info!(path = %config.output_dir.display(), "output folder");

    let extractor = FieldExtractor::new(&config.patterns)?;
    let backend = PopplerBackend::from_config(&config);
    backend.ensure_tools_available()?;
    let change_log = ChangeLog::new(config.change_log_path());

    let summary = process_batch(&config, &backend, &extractor, &change_log, started)?;

    info!(
        run = %summary.run_stamp,
        processed = summary.processed_pdf_count,
        failed = summary.failed_pdf_count,
        companies = summary.company_count,
        contacts = summary.contact_count,
        text_layer_pages = summary.text_layer_page_count,
        ocr_pages = summary.ocr_page_count,
        ocr_failed_pages = summary.ocr_failed_page_count,
        warnings = summary.warnings.len(),
        "processing complete"
    );

    Ok(())
}

#[derive(Debug, Clone)]
pub(super) struct ProcessedDocument {
    pub company: CompanyRecord,
    pub contacts: Vec<ContactRecord>,
    pub text_layer_pages: usize,
    pub ocr_pages: usize,
    pub ocr_failed_pages: usize,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub(super) struct DocumentFailure {
    pub stage: DocumentStage,
    pub reason: String,
}

impl DocumentFailure {
    fn new(stage: DocumentStage, error: &anyhow::Error) -> Self {
        Self {
            stage,
            reason: format!("{error:#}"),
        }
    }
}

pub(super) fn process_batch(
    config: &ExtractorConfig,
    backend: &dyn PdfBackend,
    extractor: &FieldExtractor,
    change_log: &ChangeLog,
    started: DateTime<Local>,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary {
        run_stamp: run_stamp(started),
        ..BatchSummary::default()
    };

    let mut pdf_paths = discover_pdfs(&config.input_dir)?;
    summary.discovered_pdf_count = pdf_paths.len();
    if let Some(limit) = config.pdf_limit() {
        pdf_paths.truncate(limit);
    }
    summary.selected_pdf_count = pdf_paths.len();
    info!(
        found = summary.discovered_pdf_count,
        selected = summary.selected_pdf_count,
        "PDF files to process"
    );

    if pdf_paths.is_empty() {
        warn!(path = %config.input_dir.display(), "no PDF files found in input folder");
        return Ok(summary);
    }

    let mut companies: Vec<CompanyRecord> = Vec::new();
    let mut contacts: Vec<ContactRecord> = Vec::new();

    for pdf_path in &pdf_paths {
        info!(pdf = %pdf_path.display(), "processing");

        match process_document(config, backend, extractor, pdf_path) {
            Ok(document) => {
                summary.processed_pdf_count += 1;
                summary.text_layer_page_count += document.text_layer_pages;
                summary.ocr_page_count += document.ocr_pages;
                summary.ocr_failed_page_count += document.ocr_failed_pages;
                summary.warnings.extend(document.warnings);

                info!(
                    pdf = %pdf_path.display(),
                    contacts = document.contacts.len(),
                    "extracted contacts"
                );
                companies.push(document.company);
                contacts.extend(document.contacts);
                advance(pdf_path, DocumentStage::RecordsBuilt, DocumentStage::Aggregated);
            }
            Err(failure) => {
                summary.failed_pdf_count += 1;
                error!(
                    pdf = %pdf_path.display(),
                    stage = failure.stage.as_str(),
                    reason = %failure.reason,
                    "failed to process document; skipping"
                );
                summary.warnings.push(format!(
                    "skipped {} after {}: {}",
                    pdf_path.display(),
                    failure.stage.as_str(),
                    failure.reason
                ));
            }
        }
    }

    if companies.is_empty() && contacts.is_empty() {
        warn!("no data extracted from any PDFs");
        return Ok(summary);
    }

    let (company_path, contact_path) = write_outputs(
        config,
        change_log,
        &summary.run_stamp,
        &companies,
        &contacts,
    )?;

    summary.company_count = companies.len();
    summary.contact_count = contacts.len();
    summary.company_csv_path = Some(company_path);
    summary.contact_csv_path = Some(contact_path);

    Ok(summary)
}

pub(super) fn process_document(
    config: &ExtractorConfig,
    backend: &dyn PdfBackend,
    extractor: &FieldExtractor,
    pdf_path: &Path,
) -> Result<ProcessedDocument, DocumentFailure> {
    let stem = file_stem_string(pdf_path);
    let mut stage = DocumentStage::Pending;

    let boundary = locate_scan_boundary(
        backend,
        pdf_path,
        &config.toc_keywords,
        config.max_pages_to_scan,
    );
    stage = advance(pdf_path, stage, DocumentStage::TocLocated);
    debug!(
        pdf = %pdf_path.display(),
        end_page = boundary.end_page,
        source = ?boundary.source,
        "scan boundary"
    );

    let resolved = resolve_document_text(backend, pdf_path, boundary.end_page)
        .map_err(|error| DocumentFailure::new(stage, &error))?;
    stage = advance(pdf_path, stage, DocumentStage::TextExtracted);

    let text = resolved.joined();
    if text.trim().is_empty() {
        warn!(pdf = %pdf_path.display(), "no text extracted");
    }

    let fields = extractor.extract(&text);
    stage = advance(pdf_path, stage, DocumentStage::FieldsExtracted);
    if let Some(mention) = fields.company_mentions.first() {
        debug!(pdf = %pdf_path.display(), mention = %mention, "company name candidate");
    }

    let created_at = now_local_string();
    let company = build_company_record(&stem, &fields, &created_at);
    let contacts = build_contact_records(&stem, &fields, &company, &created_at)
        .map_err(|error| DocumentFailure::new(stage, &error))?;
    advance(pdf_path, stage, DocumentStage::RecordsBuilt);

    Ok(ProcessedDocument {
        company,
        contacts,
        text_layer_pages: resolved.text_layer_page_count(),
        ocr_pages: resolved.ocr_page_count(),
        ocr_failed_pages: resolved.ocr_failed_page_count(),
        warnings: resolved.warnings(pdf_path),
    })
}

fn advance(pdf_path: &Path, from: DocumentStage, to: DocumentStage) -> DocumentStage {
    debug!(
        pdf = %pdf_path.display(),
        from = from.as_str(),
        to = to.as_str(),
        "document stage"
    );
    to
}

pub(super) fn discover_pdfs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            pdfs.push(path);
        }
    }

    Ok(pdfs)
}

fn write_outputs(
    config: &ExtractorConfig,
    change_log: &ChangeLog,
    stamp: &str,
    companies: &[CompanyRecord],
    contacts: &[ContactRecord],
) -> Result<(PathBuf, PathBuf)> {
    let company_path = config.output_dir.join(format!("companies_{stamp}.csv"));
    let company_csv = render_csv(
        &config.company_headers,
        companies.iter().map(CompanyRecord::values),
    );
    write_csv_file(&company_path, &company_csv)?;
    record_output(
        change_log,
        &company_path,
        &format!(
            "Created/updated company data with {} records.",
            companies.len()
        ),
    );
    info!(path = %company_path.display(), records = companies.len(), "companies saved");

    let contact_path = config.output_dir.join(format!("contacts_{stamp}.csv"));
    let contact_csv = render_csv(
        &config.contact_headers,
        contacts.iter().map(ContactRecord::values),
    );
    write_csv_file(&contact_path, &contact_csv)?;
    record_output(
        change_log,
        &contact_path,
        &format!(
            "Created/updated contact data with {} records.",
            contacts.len()
        ),
    );
    info!(path = %contact_path.display(), records = contacts.len(), "contacts saved");

    Ok((company_path, contact_path))
}

fn record_output(change_log: &ChangeLog, path: &Path, description: &str) {
    match sha256_file(path) {
        Ok(digest) => info!(path = %path.display(), sha256 = %digest, "output digest"),
        Err(error) => {
            warn!(path = %path.display(), error = %format!("{error:#}"), "failed to hash output")
        }
    }

    if let Err(error) = change_log.log_change(&path.display().to_string(), description) {
        warn!(
            log = %change_log.path().display(),
            error = %format!("{error:#}"),
            "failed to write change log entry"
        );
    }
}
