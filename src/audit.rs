use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::{ensure_directory, now_local_string};

#[derive(Debug, Clone)]
pub struct ChangeLog {
    path: PathBuf,
}

impl ChangeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_change(&self, file_path: &str, description: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open change log {}", self.path.display()))?;

        writeln!(
            file,
            "{} - FILE: {} - CHANGE: {}",
            now_local_string(),
            file_path,
            description
        )
        .with_context(|| format!("failed to append to change log {}", self.path.display()))?;

        Ok(())
    }

    pub fn history(&self, file_path: &str) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path)
            .with_context(|| format!("failed to open change log {}", self.path.display()))?;
        let needle = format!("FILE: {file_path}");

        let mut history = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line
                .with_context(|| format!("failed to read change log {}", self.path.display()))?;
            if line.contains(&needle) {
                history.push(line.trim().to_string());
            }
        }

        Ok(history)
    }
}
