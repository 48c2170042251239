use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vkfossil_types::ObjectKind;

#[derive(Parser)]
#[command(
    name = "vkfossil",
    about = "Export persistent Vulkan state from API captures",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a capture and write its state blob
    Export(ExportArgs),
    /// List the records of a capture and which ones would be exported
    Inspect(InspectArgs),
    /// Show the converter registration
    Info,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Capture document (JSON)
    pub capture: PathBuf,
    /// Output path; defaults to the capture path with a `.fossilize.json` extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// TOML file with export settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Keep handles that were never created instead of failing
    #[arg(long)]
    pub pass_through: bool,
    /// Write the blob without indentation
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Capture document (JSON)
    pub capture: PathBuf,
    /// Only list records creating this kind of object
    #[arg(short, long)]
    pub kind: Option<ObjectKind>,
}
