use anyhow::{Context, bail};
use tally_config::{ChartsConfig, MountConfig, TallyConfig};
use tally_mount::{CycleOutcome, MountCoordinator};
use tally_query::StashClient;
use tally_view::{Anchor, ChartBackend, ChartJsBackend, ChartSink, TextBackend};

use crate::cli::root_commands::RenderArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;
use crate::progress::Progress;

/// Handle `tally render`.
pub async fn handle(
    args: &RenderArgs,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut charts = config.charts.clone();
    if let Some(limit) = args.limit {
        charts.tag_limit = limit;
    }
    let client = StashClient::new(&config.server).context("failed to build media server client")?;
    tracing::debug!(endpoint = client.endpoint(), "rendering statistics");

    let anchor = Anchor::new(&config.mount.anchor_selector);
    let mount = config.mount.clone();
    let spinner = Progress::spinner("Loading statistics...", flags.quiet);
    let outcome = match args.format {
        OutputFormat::Html => {
            run_cycle(client, ChartSink::new(ChartJsBackend::new()), mount, charts, &anchor).await
        }
        OutputFormat::Text | OutputFormat::Json => {
            let backend = TextBackend::new(charts.text_width);
            run_cycle(client, ChartSink::new(backend), mount, charts, &anchor).await
        }
    };

    match outcome {
        CycleOutcome::Rendered(report) => {
            spinner.finish_clear();
            let container = anchor
                .container(&config.mount.container_id)
                .context("render cycle left no container")?;
            println!("{}", output::render(&container, &report, args.format)?);
            Ok(())
        }
        CycleOutcome::Errored { message } => {
            spinner.finish_err("failed");
            bail!("error loading statistics: {message}")
        }
        CycleOutcome::Superseded => bail!("render cycle was superseded"),
    }
}

async fn run_cycle<B: ChartBackend>(
    client: StashClient,
    sink: ChartSink<B>,
    mount: MountConfig,
    charts: ChartsConfig,
    anchor: &Anchor,
) -> CycleOutcome {
    MountCoordinator::new(client, sink, mount, charts)
        .activate(anchor)
        .await
}
