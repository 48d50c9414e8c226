//! # tally-mount
//!
//! Lifecycle of the statistics view inside a long-lived host page.
//!
//! - [`bootstrap`] attaches the view once per process, through the host's
//!   navigation events, a path poller, or a one-time path check.
//! - [`MountCoordinator`] runs render cycles: loading placeholder, fetch,
//!   aggregation, then both charts or the error panel.
//! - [`HostPage`] is the seam to the page itself.

mod bootstrap;
mod coordinator;
mod host;
mod poller;
mod registry;

pub use bootstrap::{Bootstrap, BootstrapOutcome, bootstrap};
pub use coordinator::{
    CycleOutcome, CycleReport, CycleTicket, MountCoordinator, Phase, SettledCycle, TAG_CHART_TITLE,
    TAG_SERIES_LABEL, YEAR_CHART_TITLE, YEAR_SERIES_LABEL,
};
pub use host::HostPage;
pub use poller::PathPoller;
pub use registry::{PLUGIN_ID, PluginRegistry};
