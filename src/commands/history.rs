use std::io::{self, Write};

use anyhow::Result;
use tracing::info;

use crate::audit::ChangeLog;
use crate::cli::HistoryArgs;
use crate::config::ExtractorConfig;

pub fn run(args: HistoryArgs) -> Result<()> {
    let config = ExtractorConfig::load(&args.config)?;
    let change_log = ChangeLog::new(config.change_log_path());
    let entries = change_log.history(&args.file)?;

    if entries.is_empty() {
        info!(
            file = %args.file,
            log = %change_log.path().display(),
            "no change log entries"
        );
        return Ok(());
    }

    let mut out = io::BufWriter::new(io::stdout().lock());
    for entry in &entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()?;

    Ok(())
}
