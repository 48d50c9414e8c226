//! Single entry point that wires the coordinator to the host page.

use std::sync::Arc;

use tally_query::MediaSource;
use tally_view::{Anchor, ChartBackend};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use crate::coordinator::MountCoordinator;
use crate::host::HostPage;
use crate::poller::PathPoller;
use crate::registry::{PLUGIN_ID, PluginRegistry};

/// How [`bootstrap`] attached the view to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Subscribed to the host's navigation events.
    Listening,
    /// Polling the current path at the configured interval.
    Polling,
    /// No navigation events; checked the path once at load time.
    CheckedCurrentPath { activated: bool },
    /// Another bootstrap already ran in this process; nothing was done.
    AlreadyLoaded,
}

/// Result of [`bootstrap`]: the attach mode plus the task driving activations.
#[derive(Debug)]
pub struct Bootstrap {
    pub outcome: BootstrapOutcome,
    driver: Option<JoinHandle<()>>,
}

impl Bootstrap {
    /// Wait until no further activations can happen: the navigation stream
    /// has ended and every started cycle has settled.
    pub async fn finished(self) {
        if let Some(driver) = self.driver {
            if let Err(e) = driver.await {
                warn!(error = %e, "activation driver ended abnormally");
            }
        }
    }
}

/// Attach the statistics view to `host`, at most once per `registry`.
///
/// Prefers the host's navigation events. Without them, polls the path when
/// the mount config sets a poll interval, or else checks the current path
/// once. Must be called from within a tokio runtime.
pub fn bootstrap<H, S, B>(
    registry: &PluginRegistry,
    host: &Arc<H>,
    coordinator: &Arc<MountCoordinator<S, B>>,
) -> Bootstrap
where
    H: HostPage + 'static,
    S: MediaSource + Send + Sync + 'static,
    B: ChartBackend + Send + 'static,
    B::Handle: Send,
{
    if !registry.try_register(PLUGIN_ID) {
        info!(plugin = PLUGIN_ID, "statistics plugin already loaded");
        return Bootstrap {
            outcome: BootstrapOutcome::AlreadyLoaded,
            driver: None,
        };
    }
    info!(plugin = PLUGIN_ID, "statistics plugin started");

    let mount = coordinator.mount_config();
    let bootstrap = if let Some(anchors) =
        host.path_element_listener(&mount.path, &mount.anchor_selector)
    {
        debug!(path = %mount.path, "listening for navigation events");
        Bootstrap {
            outcome: BootstrapOutcome::Listening,
            driver: Some(tokio::spawn(drive(Arc::clone(coordinator), anchors))),
        }
    } else if let Some(interval) = mount.poll_interval() {
        warn!(
            interval_ms = mount.poll_interval_ms,
            "host has no navigation events; polling the current path"
        );
        let poller = PathPoller::new(&mount.path, &mount.anchor_selector, interval);
        let anchors = poller.spawn(Arc::clone(host));
        Bootstrap {
            outcome: BootstrapOutcome::Polling,
            driver: Some(tokio::spawn(drive(Arc::clone(coordinator), anchors))),
        }
    } else {
        warn!("host has no navigation events; checking the current path once");
        check_current_path(host.as_ref(), coordinator)
    };

    info!(plugin = PLUGIN_ID, "statistics plugin fully initialized");
    bootstrap
}

fn check_current_path<H, S, B>(host: &H, coordinator: &Arc<MountCoordinator<S, B>>) -> Bootstrap
where
    H: HostPage,
    S: MediaSource + Send + Sync + 'static,
    B: ChartBackend + Send + 'static,
    B::Handle: Send,
{
    let mount = coordinator.mount_config();
    let not_activated = Bootstrap {
        outcome: BootstrapOutcome::CheckedCurrentPath { activated: false },
        driver: None,
    };

    if host.current_path() != mount.path {
        return not_activated;
    }
    let Some(anchor) = host.query_anchor(&mount.anchor_selector) else {
        warn!(selector = %mount.anchor_selector, "anchor element not found for direct render");
        return not_activated;
    };

    info!(path = %mount.path, "rendering directly on current path");
    let ticket = coordinator.start_cycle(&anchor);
    let coordinator = Arc::clone(coordinator);
    Bootstrap {
        outcome: BootstrapOutcome::CheckedCurrentPath { activated: true },
        driver: Some(tokio::spawn(async move {
            coordinator.complete_cycle(ticket).await;
        })),
    }
}

/// Start a cycle per received anchor, in arrival order, and let the cycles
/// complete concurrently.
async fn drive<S, B>(coordinator: Arc<MountCoordinator<S, B>>, mut anchors: UnboundedReceiver<Anchor>)
where
    S: MediaSource + Send + Sync + 'static,
    B: ChartBackend + Send + 'static,
    B::Handle: Send,
{
    let mut cycles = JoinSet::new();
    while let Some(anchor) = anchors.recv().await {
        let ticket = coordinator.start_cycle(&anchor);
        let coordinator = Arc::clone(&coordinator);
        cycles.spawn(async move {
            coordinator.complete_cycle(ticket).await;
        });
        while cycles.try_join_next().is_some() {}
    }
    debug!("navigation stream closed");
    while cycles.join_next().await.is_some() {}
}
