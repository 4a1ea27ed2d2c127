use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::chunking::{DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS};

#[derive(Parser, Debug)]
#[command(
    name = "elementary",
    version,
    about = "Section reconstruction and chunking for parsed document elements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Inspect(InspectArgs),
    Annotate(AnnotateArgs),
    Build(BuildArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StructureArgs {
    #[arg(long, default_value = "Title")]
    pub title_category: String,

    #[arg(long, default_value_t = false)]
    pub exclude_boundaries: bool,

    #[arg(long, default_value = "references")]
    pub reserved_title: String,

    #[arg(long, default_value = "Header")]
    pub header_category: String,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub max_items: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub relations: bool,

    #[arg(long, default_value_t = false)]
    pub boundaries: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub structure: StructureArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AnnotateArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub structure: StructureArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub chunks_output: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_MIN_CHARS)]
    pub min_chars: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,

    #[command(flatten)]
    pub structure: StructureArgs,
}
