use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Records test-run results into a branch-windowed relational store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest a TRX report into the store
    Ingest(IngestArgs),
    /// Create the base tables and seed the first active branch
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct IngestArgs {
    /// Path to the TRX report document
    pub report: PathBuf,

    /// Run timestamp, formatted yyyy_MM_dd_HHmm (e.g. 2025_01_08_1627)
    pub timestamp: String,

    /// Target branch name, e.g. nano165
    pub branch: String,

    /// Product version the run was built from
    pub version: String,

    /// SQLite database path (overrides config file and TALLY_DB)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Config file with the database location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    /// Branch to seed as the first active branch
    pub branch: String,

    /// SQLite database path (overrides config file and TALLY_DB)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Config file with the database location
    #[arg(long)]
    pub config: Option<PathBuf>,
}
