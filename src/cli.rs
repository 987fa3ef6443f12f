use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "constitution",
    version,
    about = "Local Constitution of India parsing and answer-analysis tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse extracted document text into canonical structural sections
    Parse(ParseArgs),
    /// Extract and score the reasoning chain from one model response
    Reason(ReasonArgs),
    /// Validate an answer's citations against retrieved context passages
    Cite(CiteArgs),
    /// Report the newest parse run and the contents of the section index
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Text of the source document, one form-feed separator per page
    /// boundary (pdftotext layout)
    #[arg(long)]
    pub source_path: PathBuf,

    #[arg(long, default_value = ".cache/constitution")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub sections_path: Option<PathBuf>,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ReasonArgs {
    /// File holding one full model response, thinking markers included
    #[arg(long)]
    pub response_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CiteArgs {
    /// File holding the generated answer to check
    #[arg(long)]
    pub answer_path: PathBuf,

    /// Retrieved context passage file; repeat for multiple passages
    #[arg(long = "context-path")]
    pub context_paths: Vec<PathBuf>,

    /// Strip thinking spans from the answer before extracting citations
    #[arg(long, default_value_t = false)]
    pub clean_first: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/constitution")]
    pub cache_root: PathBuf,
}
