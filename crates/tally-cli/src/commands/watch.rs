use std::sync::Arc;

use anyhow::Context;
use tally_config::TallyConfig;
use tally_mount::{MountCoordinator, PluginRegistry, SettledCycle, bootstrap};
use tally_query::StashClient;
use tally_view::{Anchor, ChartBackend, ChartJsBackend, ChartSink, TextBackend};
use tokio::sync::broadcast::error::RecvError;

use crate::cli::root_commands::WatchArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::host::TerminalHost;
use crate::output;

/// Handle `tally watch`.
pub async fn handle(
    args: &WatchArgs,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = StashClient::new(&config.server).context("failed to build media server client")?;
    let host = Arc::new(TerminalHost::from_stdin(
        &args.start,
        Anchor::new(&config.mount.anchor_selector),
    ));
    if !flags.quiet {
        eprintln!(
            "Watching navigation on stdin; enter {} to render statistics.",
            config.mount.path
        );
    }

    match args.format {
        OutputFormat::Html => {
            watch_with(host, client, ChartSink::new(ChartJsBackend::new()), config, args.format)
                .await
        }
        OutputFormat::Text | OutputFormat::Json => {
            let backend = TextBackend::new(config.charts.text_width);
            watch_with(host, client, ChartSink::new(backend), config, args.format).await
        }
    }
}

async fn watch_with<B>(
    host: Arc<TerminalHost>,
    client: StashClient,
    sink: ChartSink<B>,
    config: &TallyConfig,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    B: ChartBackend + Send + 'static,
    B::Handle: Send,
{
    let coordinator = Arc::new(MountCoordinator::new(
        client,
        sink,
        config.mount.clone(),
        config.charts.clone(),
    ));

    let mut settled = coordinator.subscribe_settled();
    let printer = tokio::spawn(async move {
        loop {
            let cycle = match settled.recv().await {
                Ok(cycle) => cycle,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "output fell behind; settled cycles skipped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            if let Err(error) = print_settled(&cycle, format) {
                tracing::warn!(%error, "failed to print render cycle");
            }
        }
    });

    let attached = bootstrap(PluginRegistry::global(), &host, &coordinator);
    tracing::info!(outcome = ?attached.outcome, "statistics view attached");
    attached.finished().await;

    drop(coordinator);
    printer.await.context("output task failed")?;
    Ok(())
}

fn print_settled(cycle: &SettledCycle, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return output::json_line(&cycle.report);
    }
    let Some(container) = &cycle.container else {
        return Ok(());
    };
    match format {
        OutputFormat::Html => println!("{}", container.to_html()),
        OutputFormat::Text | OutputFormat::Json => println!("{}", container.to_text()),
    }
    Ok(())
}
