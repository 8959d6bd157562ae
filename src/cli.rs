use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pdf-contact-extract",
    version,
    about = "Extract company and contact records from scanned PDFs into CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    History(HistoryArgs),
    Status(StatusArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub change_log: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long)]
    pub max_pdfs: Option<usize>,

    #[arg(long)]
    pub max_pages_to_scan: Option<usize>,

    #[arg(long)]
    pub ocr_dpi: Option<u32>,

    #[arg(long)]
    pub ocr_lang: Option<String>,

    #[arg(long)]
    pub tesseract_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long)]
    pub file: String,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    #[arg(long, default_value = "pdf-contact-extract.json")]
    pub path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}
