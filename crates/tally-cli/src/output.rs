use serde::Serialize;
use tally_core::StatsReport;
use tally_view::Container;

use crate::cli::OutputFormat;

/// Render a rendered cycle's container or report in the requested format.
pub fn render(container: &Container, report: &StatsReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n{}", summary(report), container.to_text())),
        OutputFormat::Html => Ok(container.to_html()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

/// Print any serializable value as one JSON line.
pub fn json_line<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// One-line headline for terminal output.
pub fn summary(report: &StatsReport) -> String {
    format!(
        "{} items ({} scenes, {} images), total O-count {}",
        report.item_count, report.scene_count, report.image_count, report.total_mark_count
    )
}
