use clap::ValueEnum;

/// How a settled render cycle is printed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Charts drawn as terminal text.
    #[default]
    Text,
    /// The aggregated statistics as JSON.
    Json,
    /// Page fragment with Chart.js scripts.
    Html,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub server: Option<String>,
}
