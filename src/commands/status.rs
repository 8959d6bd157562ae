use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::audit::ChangeLog;
use crate::cli::StatusArgs;
use crate::commands::extract::{CsvTable, PopplerBackend, read_company_csv, read_contact_csv};
use crate::config::ExtractorConfig;

pub fn run(args: StatusArgs) -> Result<()> {
    let config = ExtractorConfig::load(&args.config)?;
    let change_log = ChangeLog::new(config.change_log_path());

    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        max_pdfs = config.max_pdfs,
        "status requested"
    );

    for (tool, version) in PopplerBackend::from_config(&config).tool_versions() {
        match version {
            Some(version) => info!(tool = %tool, version = %version, "tool available"),
            None => warn!(tool = %tool, "tool unavailable"),
        }
    }

    if !config.output_dir.exists() {
        warn!(path = %config.output_dir.display(), "output folder missing");
        return Ok(());
    }

    match latest_output(&config.output_dir, "companies_")? {
        Some(path) => {
            let table = read_company_csv(&path)?;
            report_table(&path, &table, &config.company_headers, &change_log)?;
        }
        None => warn!(path = %config.output_dir.display(), "no companies CSV found"),
    }

    match latest_output(&config.output_dir, "contacts_")? {
        Some(path) => {
            let table = read_contact_csv(&path)?;
            report_table(&path, &table, &config.contact_headers, &change_log)?;
        }
        None => warn!(path = %config.output_dir.display(), "no contacts CSV found"),
    }

    Ok(())
}

fn report_table<T>(
    path: &Path,
    table: &CsvTable<T>,
    expected_headers: &[String],
    change_log: &ChangeLog,
) -> Result<()> {
    let history = change_log.history(&path.display().to_string())?;

    info!(
        path = %path.display(),
        records = table.records.len(),
        headers_match = table.headers == expected_headers,
        change_log_entries = history.len(),
        "latest output"
    );
    if let Some(last) = history.last() {
        info!(entry = %last, "last change");
    }

    Ok(())
}

fn latest_output(output_dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let entries = fs::read_dir(output_dir)
        .with_context(|| format!("failed to read {}", output_dir.display()))?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", output_dir.display()))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !name.starts_with(prefix) || !name.ends_with(".csv") {
            continue;
        }

        let newer = latest
            .as_ref()
            .and_then(|current| current.file_name())
            .is_none_or(|current| current.to_string_lossy().as_ref() < name);
        if newer {
            latest = Some(path);
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_output_picks_newest_run_stamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in [
            "companies_20240101_090000.csv",
            "companies_20240315_120000.csv",
            "companies_20231231_235959.csv",
            "contacts_20250101_000000.csv",
            "change_log.txt",
        ] {
            fs::write(dir.path().join(name), "x").expect("write");
        }

        let latest = latest_output(dir.path(), "companies_").expect("scan");
        assert_eq!(
            latest,
            Some(dir.path().join("companies_20240315_120000.csv"))
        );
        assert_eq!(latest_output(dir.path(), "missing_").expect("scan"), None);
    }
}
