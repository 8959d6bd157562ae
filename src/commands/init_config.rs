use anyhow::{Result, bail};
use tracing::info;

use crate::cli::InitConfigArgs;
use crate::config::ExtractorConfig;
use crate::util::write_json_pretty;

pub fn run(args: InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        );
    }

    write_json_pretty(&args.path, &ExtractorConfig::default())?;
    info!(path = %args.path.display(), "wrote default config");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_config_loads_back_and_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("extract.json");
        let args = InitConfigArgs {
            path: path.clone(),
            force: false,
        };

        run(args.clone()).expect("first write");
        let loaded = ExtractorConfig::from_file(&path).expect("load");
        assert_eq!(loaded.max_pdfs, 5);
        assert_eq!(loaded.ocr.dpi, 300);

        let err = run(args).expect_err("second write without force");
        assert!(err.to_string().contains("--force"));

        run(InitConfigArgs { path, force: true }).expect("forced write");
    }
}
