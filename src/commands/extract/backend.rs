use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::config::ExtractorConfig;

pub trait PdfBackend {
    fn page_count(&self, pdf_path: &Path) -> Result<usize>;
    fn page_text(&self, pdf_path: &Path, page_index: usize) -> Result<String>;
    fn ocr_page(&self, pdf_path: &Path, page_index: usize) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct PopplerBackend {
    ocr_dpi: u32,
    ocr_lang: String,
    tesseract: PathBuf,
}

impl PopplerBackend {
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            ocr_dpi: config.ocr.dpi,
            ocr_lang: config.ocr.language.clone(),
            tesseract: config.tesseract_program(),
        }
    }

    pub fn ensure_tools_available(&self) -> Result<()> {
        let mut missing = Vec::new();
        for program in ["pdfinfo", "pdftotext", "pdftoppm"] {
            if !command_available(Path::new(program)) {
                missing.push(program.to_string());
            }
        }
        if !command_available(&self.tesseract) {
            missing.push(self.tesseract.display().to_string());
        }

        if !missing.is_empty() {
            bail!("required tools are unavailable: {}", missing.join(", "));
        }
        Ok(())
    }

    pub fn tool_versions(&self) -> Vec<(String, Option<String>)> {
        vec![
            (
                "pdfinfo".to_string(),
                command_version_optional(Path::new("pdfinfo"), &["-v"]),
            ),
            (
                "pdftotext".to_string(),
                command_version_optional(Path::new("pdftotext"), &["-v"]),
            ),
            (
                "pdftoppm".to_string(),
                command_version_optional(Path::new("pdftoppm"), &["-v"]),
            ),
            (
                self.tesseract.display().to_string(),
                command_version_optional(&self.tesseract, &["--version"]),
            ),
        ]
    }
}

impl PdfBackend for PopplerBackend {
    fn page_count(&self, pdf_path: &Path) -> Result<usize> {
        let output = Command::new("pdfinfo")
            .arg(pdf_path)
            .output()
            .with_context(|| format!("failed to execute pdfinfo for {}", pdf_path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdfinfo returned non-zero exit status for {}: {}",
                pdf_path.display(),
                stderr.trim()
            );
        }

        parse_pdfinfo_page_count(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("pdfinfo reported no page count for {}", pdf_path.display()))
    }

    fn page_text(&self, pdf_path: &Path, page_index: usize) -> Result<String> {
        let page_number = page_index + 1;
        let output = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(pdf_path)
            .arg("-")
            .output()
            .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdftotext returned non-zero exit status for {} page {}: {}",
                pdf_path.display(),
                page_number,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .replace(['\u{000C}', '\u{0000}'], ""))
    }

    fn ocr_page(&self, pdf_path: &Path, page_index: usize) -> Result<String> {
        let page_number = page_index + 1;
        let safe_stem = pdf_path
            .file_stem()
            .and_then(|value| value.to_str())
            .unwrap_or("pdf")
            .chars()
            .map(|character| {
                if character.is_ascii_alphanumeric() {
                    character
                } else {
                    '_'
                }
            })
            .collect::<String>();

        let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let output_root = std::env::temp_dir().join(format!(
            "pdf_contact_ocr_{}_{}_{}_{}",
            safe_stem,
            std::process::id(),
            page_number,
            stamp
        ));
        let png_path = PathBuf::from(format!("{}.png", output_root.display()));

        let pdftoppm_output = Command::new("pdftoppm")
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg("-r")
            .arg(self.ocr_dpi.to_string())
            .arg("-singlefile")
            .arg("-png")
            .arg(pdf_path)
            .arg(&output_root)
            .output()
            .with_context(|| format!("failed to execute pdftoppm for {}", pdf_path.display()))?;

        if !pdftoppm_output.status.success() {
            let stderr = String::from_utf8_lossy(&pdftoppm_output.stderr);
            bail!(
                "pdftoppm returned non-zero exit status for {} page {}: {}",
                pdf_path.display(),
                page_number,
                stderr.trim()
            );
        }

        if !png_path.exists() {
            bail!(
                "pdftoppm did not produce expected image for {} page {}",
                pdf_path.display(),
                page_number
            );
        }

        let tesseract_output = Command::new(&self.tesseract)
            .arg(&png_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.ocr_lang)
            .output()
            .with_context(|| {
                format!(
                    "failed to execute {} for {}",
                    self.tesseract.display(),
                    png_path.display()
                )
            });

        let _ = fs::remove_file(&png_path);
        let tesseract_output = tesseract_output?;

        if !tesseract_output.status.success() {
            let stderr = String::from_utf8_lossy(&tesseract_output.stderr);
            bail!(
                "tesseract returned non-zero exit status for {} page {}: {}",
                pdf_path.display(),
                page_number,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&tesseract_output.stdout).replace('\u{0000}', ""))
    }
}

pub(super) fn parse_pdfinfo_page_count(stdout: &str) -> Option<usize> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse::<usize>().ok())
}

fn command_available(program: &Path) -> bool {
    Command::new(program).arg("-v").output().is_ok()
}

fn command_version_optional(program: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let source = if stdout.trim().is_empty() {
        stderr.trim()
    } else {
        stdout.trim()
    };

    source
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
}
