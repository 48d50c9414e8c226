use clap::{Args, Subcommand};

use crate::cli::OutputFormat;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch, aggregate and print the statistics once.
    Render(RenderArgs),
    /// Read navigation paths from stdin and re-render on each visit to the
    /// statistics path.
    Watch(WatchArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of tags shown in the tag chart
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    /// Output format for each settled cycle
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path the session starts on
    #[arg(long, default_value = "/")]
    pub start: String,
}
