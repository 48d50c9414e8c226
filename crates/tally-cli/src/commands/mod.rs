use tally_config::TallyConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod config;
pub mod render;
pub mod watch;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Render(args) => render::handle(&args, config, flags).await,
        Commands::Watch(args) => watch::handle(&args, config, flags).await,
        Commands::Config => config::handle(config),
    }
}
