use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{ConfigArgs, ExtractArgs};
use crate::model::{COMPANY_HEADERS, CONTACT_HEADERS};

pub const DEFAULT_TOC_KEYWORDS: [&str; 8] = [
    "table of contents",
    "contents",
    "chapter 1",
    "chapter one",
    "introduction",
    "preface",
    "foreword",
    "chapter i",
];

const DEFAULT_CHANGE_LOG_NAME: &str = "change_log.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_pdfs: usize,
    pub max_pages_to_scan: usize,
    pub ocr: OcrConfig,
    pub toc_keywords: Vec<String>,
    pub patterns: PatternConfig,
    pub company_headers: Vec<String>,
    pub contact_headers: Vec<String>,
    pub change_log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub dpi: u32,
    pub language: String,
    pub tesseract_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub email: String,
    pub phone: String,
    pub url: String,
    pub company_name: String,
    pub address: String,
    pub city_state_zip: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            max_pdfs: 5,
            max_pages_to_scan: 10,
            ocr: OcrConfig::default(),
            toc_keywords: DEFAULT_TOC_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            patterns: PatternConfig::default(),
            company_headers: COMPANY_HEADERS.iter().map(|h| h.to_string()).collect(),
            contact_headers: CONTACT_HEADERS.iter().map(|h| h.to_string()).collect(),
            change_log_path: None,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            language: "eng".to_string(),
            tesseract_path: None,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            email: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b".to_string(),
            phone: r"(?:\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})"
                .to_string(),
            url: r"https?://(?:[-\w.])+(?:[:\d]+)?(?:/(?:[\w/_.])*(?:\?(?:[\w&=%.])*)?(?:#(?:[\w.])*)?)?"
                .to_string(),
            company_name: r"(?:Company|Corporation|Corp|Inc|LLC|Ltd|Limited)[^\r\n]*".to_string(),
            address: r"\d+\s+[\w\s]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Place|Pl)"
                .to_string(),
            city_state_zip: r"([A-Za-z\s]+),\s*([A-Z]{2})\s*(\d{5}(?:-\d{4})?)".to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        let config = Self::resolve(args)?;
        config.validate()?;
        Ok(config)
    }

    fn resolve(args: &ConfigArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(input_dir) = &args.input_dir {
            config.input_dir = input_dir.clone();
        }
        if let Some(output_dir) = &args.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(change_log) = &args.change_log {
            config.change_log_path = Some(change_log.clone());
        }

        Ok(config)
    }

    pub fn load_for_extract(args: &ExtractArgs) -> Result<Self> {
        let mut config = Self::resolve(&args.config)?;

        if let Some(max_pdfs) = args.max_pdfs {
            config.max_pdfs = max_pdfs;
        }
        if let Some(max_pages) = args.max_pages_to_scan {
            config.max_pages_to_scan = max_pages;
        }
        if let Some(dpi) = args.ocr_dpi {
            config.ocr.dpi = dpi;
        }
        if let Some(lang) = &args.ocr_lang {
            config.ocr.language = lang.clone();
        }
        if let Some(path) = &args.tesseract_path {
            config.ocr.tesseract_path = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ocr.dpi == 0 {
            bail!("ocr.dpi must be greater than zero");
        }
        if self.ocr.language.trim().is_empty() {
            bail!("ocr.language must not be empty");
        }
        if self.company_headers.len() != COMPANY_HEADERS.len() {
            bail!(
                "company_headers must list {} columns, found {}",
                COMPANY_HEADERS.len(),
                self.company_headers.len()
            );
        }
        if self.contact_headers.len() != CONTACT_HEADERS.len() {
            bail!(
                "contact_headers must list {} columns, found {}",
                CONTACT_HEADERS.len(),
                self.contact_headers.len()
            );
        }
        Ok(())
    }

    pub fn pdf_limit(&self) -> Option<usize> {
        if self.max_pdfs == 0 {
            None
        } else {
            Some(self.max_pdfs)
        }
    }

    pub fn change_log_path(&self) -> PathBuf {
        self.change_log_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join(DEFAULT_CHANGE_LOG_NAME))
    }

    pub fn tesseract_program(&self) -> PathBuf {
        self.ocr
            .tesseract_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("tesseract"))
    }
}
