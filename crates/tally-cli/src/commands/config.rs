use tally_config::TallyConfig;

/// Handle `tally config`.
pub fn handle(config: &TallyConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
