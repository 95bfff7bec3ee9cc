use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fragstate",
    about = "Inspect and edit URL fragments that carry application state",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `format` and `managed_keys`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the path and decoded query of a fragment
    Parse(ParseArgs),
    /// Build a fragment from a path and KEY=VALUE pairs
    Build(BuildArgs),
    /// Read one key, or every key, from a fragment
    Get(GetArgs),
    /// Write managed keys into a fragment
    Set(SetArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    pub fragment: String,
}

#[derive(Args)]
pub struct BuildArgs {
    #[arg(long, default_value = "")]
    pub path: String,
    /// KEY=VALUE pairs
    pub pairs: Vec<String>,
    /// Emit `#key=value` with no `?` separator
    #[arg(long)]
    pub bare: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub fragment: String,
    pub key: Option<String>,
}

#[derive(Args)]
pub struct SetArgs {
    pub fragment: String,
    /// KEY=VALUE assignments
    pub assignments: Vec<String>,
    /// Keys this write may touch
    #[arg(long, value_delimiter = ',')]
    pub manage: Vec<String>,
    /// Keys to remove
    #[arg(long)]
    pub delete: Vec<String>,
    /// Emit `#key=value` with no `?` separator
    #[arg(long)]
    pub bare: bool,
}
