//! # tally-view
//!
//! Everything the statistics view writes into the host page:
//! - [`surface`]: the anchor element, the mount container and its panels
//! - [`chart`]: bar-chart requests and their Chart.js-shaped configuration
//! - [`sink`]: the adapter that owns live chart handles per canvas
//! - [`text`] and [`chartjs`]: the two bundled [`ChartBackend`]s

pub mod chart;
pub mod chartjs;
mod error;
pub mod sink;
pub mod surface;
pub mod text;

pub use chart::{Axis, BarChartConfig, ChartRequest, ChartStyle, Orientation};
pub use chartjs::{ChartJsBackend, ChartJsHandle};
pub use error::{ChartError, ChartResult};
pub use sink::{ChartBackend, ChartSink, RenderOutcome};
pub use surface::{Anchor, Container, Content, Drawing, Panel, PanelBody};
pub use text::TextBackend;
