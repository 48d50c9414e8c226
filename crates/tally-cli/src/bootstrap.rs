use anyhow::Context;
use tally_config::TallyConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TallyConfig> {
    let mut config = TallyConfig::load_with_dotenv().context("failed to load configuration")?;

    if let Some(url) = &flags.server {
        tracing::debug!(%url, "server url overridden from command line");
        config.server.url.clone_from(url);
        config.validate().context("invalid --server value")?;
    }

    Ok(config)
}
