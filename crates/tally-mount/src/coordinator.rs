//! Render-cycle coordination for one mount point.
//!
//! Every activation starts a new cycle with a fresh generation number. Starting
//! a cycle is synchronous: it disposes live charts and puts the loading
//! placeholder into the container before any fetch is awaited. When a fetch
//! completes, its result is written only if its generation is still the
//! newest; otherwise the completion is dropped. The newest activation always
//! owns the container.
//!
//! All container and chart writes happen while holding the cycle state lock,
//! and that lock is never held across an `.await`.
//!
//! Two channels report progress. The `watch` channel always holds the latest
//! [`CycleReport`] and may skip intermediate phases. The settled channel
//! delivers every finished cycle with a snapshot of the container as that
//! cycle left it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tally_config::{ChartsConfig, MountConfig};
use tally_core::StatsReport;
use tally_query::{MediaSource, fetch_all};
use tally_view::{
    Anchor, ChartBackend, ChartRequest, ChartSink, ChartStyle, Container, Orientation,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

pub const TAG_SERIES_LABEL: &str = "Tag Count";
pub const TAG_CHART_TITLE: &str = "O-Count by Tag";
pub const YEAR_SERIES_LABEL: &str = "Total O-Count";
pub const YEAR_CHART_TITLE: &str = "O-Count by year of media";

const SETTLED_CAPACITY: usize = 16;

// ── Cycle state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loaded,
    Activating,
    Rendering,
    Rendered,
    Errored,
}

/// Published on the coordinator's watch channel after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub generation: u64,
    pub phase: Phase,
}

/// A finished cycle and the container exactly as it was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledCycle {
    pub report: CycleReport,
    pub container: Option<Container>,
}

/// A started cycle, to be finished by [`MountCoordinator::complete_cycle`].
#[derive(Debug, Clone)]
pub struct CycleTicket {
    pub generation: u64,
    anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered(StatsReport),
    Errored { message: String },
    /// A newer activation started while this cycle was fetching.
    Superseded,
}

struct CycleState<B: ChartBackend> {
    generation: u64,
    sink: ChartSink<B>,
}

// ── Coordinator ────────────────────────────────────────────────────

/// Sole owner and writer of the mount container and its charts.
pub struct MountCoordinator<S, B: ChartBackend> {
    source: S,
    mount: MountConfig,
    charts: ChartsConfig,
    state: Mutex<CycleState<B>>,
    reports: watch::Sender<CycleReport>,
    settled: broadcast::Sender<SettledCycle>,
}

impl<S, B> MountCoordinator<S, B>
where
    S: MediaSource + Sync,
    B: ChartBackend,
{
    pub fn new(source: S, sink: ChartSink<B>, mount: MountConfig, charts: ChartsConfig) -> Self {
        let (reports, _) = watch::channel(CycleReport {
            generation: 0,
            phase: Phase::Loaded,
        });
        let (settled, _) = broadcast::channel(SETTLED_CAPACITY);
        Self {
            source,
            mount,
            charts,
            state: Mutex::new(CycleState {
                generation: 0,
                sink,
            }),
            reports,
            settled,
        }
    }

    #[must_use]
    pub const fn mount_config(&self) -> &MountConfig {
        &self.mount
    }

    /// Receive a [`CycleReport`] after each phase transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CycleReport> {
        self.reports.subscribe()
    }

    /// Receive every cycle that renders or errors, in completion order.
    /// Superseded cycles are never delivered.
    #[must_use]
    pub fn subscribe_settled(&self) -> broadcast::Receiver<SettledCycle> {
        self.settled.subscribe()
    }

    /// The most recently published report.
    #[must_use]
    pub fn current(&self) -> CycleReport {
        *self.reports.borrow()
    }

    /// Charts currently alive across the container's canvases.
    #[must_use]
    pub fn live_charts(&self) -> usize {
        self.lock().sink.live_count()
    }

    /// Run one full render cycle into `anchor`.
    pub async fn activate(&self, anchor: &Anchor) -> CycleOutcome {
        let ticket = self.start_cycle(anchor);
        self.complete_cycle(ticket).await
    }

    /// Begin a cycle: claim the next generation, dispose live charts and show
    /// the loading placeholder.
    pub fn start_cycle(&self, anchor: &Anchor) -> CycleTicket {
        let mut state = self.lock();
        state.generation += 1;
        let generation = state.generation;
        self.publish(generation, Phase::Activating);

        state.sink.dispose_all();
        anchor.with_container(&self.mount.container_id, Container::show_loading);
        debug!(generation, container = %self.mount.container_id, "loading placeholder shown");
        self.publish(generation, Phase::Rendering);

        CycleTicket {
            generation,
            anchor: anchor.clone(),
        }
    }

    /// Fetch, aggregate and draw for a started cycle.
    pub async fn complete_cycle(&self, ticket: CycleTicket) -> CycleOutcome {
        let CycleTicket { generation, anchor } = ticket;
        let fetched = fetch_all(&self.source).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                generation,
                newest = state.generation,
                "dropping stale render cycle"
            );
            return CycleOutcome::Superseded;
        }

        match fetched {
            Ok(acquisition) => {
                info!("calculating and rendering statistics");
                let report = StatsReport::build(&acquisition.records, self.charts.tag_limit);
                let requests = [self.tag_request(&report), self.year_request(&report)];
                let canvases = [
                    self.charts.tag_canvas_id.as_str(),
                    self.charts.year_canvas_id.as_str(),
                ];
                anchor.with_container(&self.mount.container_id, |container| {
                    container.show_canvases(&canvases);
                    for request in &requests {
                        match state.sink.render(container, request) {
                            Ok(outcome) => {
                                debug!(canvas = %request.canvas_id, ?outcome, "chart rendered");
                            }
                            Err(e) => {
                                warn!(canvas = %request.canvas_id, error = %e, "chart failed to render");
                            }
                        }
                    }
                });
                self.settle(generation, Phase::Rendered, &anchor);
                info!(
                    generation,
                    items = report.item_count,
                    tags = report.tag_frequency.len(),
                    years = report.mark_count_by_year.len(),
                    "statistics rendered"
                );
                CycleOutcome::Rendered(report)
            }
            Err(e) => {
                let message = e.to_string();
                error!(generation, category = ?e.category(), error = %message, "error loading statistics");
                anchor.with_container(&self.mount.container_id, |container| {
                    container.show_error(message.clone());
                });
                self.settle(generation, Phase::Errored, &anchor);
                CycleOutcome::Errored { message }
            }
        }
    }

    fn tag_request(&self, report: &StatsReport) -> ChartRequest {
        let (labels, values) = report.tag_series();
        let colors = &self.charts.tag_colors;
        ChartRequest {
            canvas_id: self.charts.tag_canvas_id.clone(),
            labels,
            values,
            series_label: TAG_SERIES_LABEL.into(),
            title: TAG_CHART_TITLE.into(),
            orientation: Orientation::Horizontal,
            style: ChartStyle::with_colors(&colors.background, &colors.border),
        }
    }

    fn year_request(&self, report: &StatsReport) -> ChartRequest {
        let (labels, values) = report.year_series();
        let colors = &self.charts.year_colors;
        ChartRequest {
            canvas_id: self.charts.year_canvas_id.clone(),
            labels,
            values,
            series_label: YEAR_SERIES_LABEL.into(),
            title: YEAR_CHART_TITLE.into(),
            orientation: Orientation::Vertical,
            style: ChartStyle::with_colors(&colors.background, &colors.border),
        }
    }

    fn publish(&self, generation: u64, phase: Phase) {
        self.reports.send_replace(CycleReport { generation, phase });
    }

    fn settle(&self, generation: u64, phase: Phase, anchor: &Anchor) {
        self.publish(generation, phase);
        let cycle = SettledCycle {
            report: CycleReport { generation, phase },
            container: anchor.container(&self.mount.container_id),
        };
        // Err only means nobody is subscribed.
        let _ = self.settled.send(cycle);
    }

    fn lock(&self) -> MutexGuard<'_, CycleState<B>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
