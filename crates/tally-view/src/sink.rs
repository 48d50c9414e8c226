//! Chart sink: draws bar charts onto container canvases through a backend,
//! and owns the live chart handle of every canvas it has drawn on.
//!
//! At most one live chart exists per canvas id. Redrawing a canvas disposes
//! its previous chart before the new one is created. When no backend is
//! available the sink writes a notice into the panel instead of failing.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::chart::{BarChartConfig, ChartRequest};
use crate::error::ChartResult;
use crate::surface::{Container, Drawing, PanelBody};

pub const MISSING_BACKEND_NOTICE: &str = "Chart library not found.";
pub const MISSING_BACKEND_HINT: &str =
    "Please ensure the chart library is loaded before the statistics view.";

/// Contract implemented by any chart-drawing backend.
pub trait ChartBackend {
    /// Live chart instance, released through [`ChartBackend::dispose`].
    type Handle;

    /// Create a chart on `canvas_id` and return its handle together with what
    /// was drawn on the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChartError::Backend`] when the chart cannot be created.
    fn create(
        &mut self,
        canvas_id: &str,
        config: &BarChartConfig,
    ) -> ChartResult<(Self::Handle, Drawing)>;

    fn dispose(&mut self, handle: Self::Handle);
}

/// What [`ChartSink::render`] did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A chart was created on the canvas.
    Drawn,
    /// No backend; the panel now carries the fallback notice.
    Fallback,
    /// The container has no panel with the requested canvas id.
    MissingMount,
}

pub struct ChartSink<B: ChartBackend> {
    backend: Option<B>,
    live: HashMap<String, B::Handle>,
}

impl<B: ChartBackend> ChartSink<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            live: HashMap::new(),
        }
    }

    /// A sink whose chart library never loaded.
    #[must_use]
    pub fn without_backend() -> Self {
        Self {
            backend: None,
            live: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Number of canvases currently holding a live chart.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Draw `request` onto its canvas inside `container`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChartError::LengthMismatch`] before touching the
    /// container when the series is malformed, or the backend's error when
    /// chart creation fails. The canvas has no live chart after a failure.
    pub fn render(
        &mut self,
        container: &mut Container,
        request: &ChartRequest,
    ) -> ChartResult<RenderOutcome> {
        request.check()?;

        let Some(panel) = container.panel_mut(&request.canvas_id) else {
            warn!(canvas = %request.canvas_id, "canvas not mounted; chart skipped");
            return Ok(RenderOutcome::MissingMount);
        };

        let Some(backend) = self.backend.as_mut() else {
            panel.body = PanelBody::Notice(vec![
                MISSING_BACKEND_NOTICE.to_string(),
                MISSING_BACKEND_HINT.to_string(),
            ]);
            error!(title = %request.title, "chart library is not loaded; cannot draw chart");
            return Ok(RenderOutcome::Fallback);
        };

        if let Some(previous) = self.live.remove(&request.canvas_id) {
            debug!(canvas = %request.canvas_id, "disposing previous chart");
            backend.dispose(previous);
            panel.body = PanelBody::Canvas(None);
        }

        let (handle, drawing) = backend.create(&request.canvas_id, &request.config())?;
        panel.body = PanelBody::Canvas(Some(drawing));
        self.live.insert(request.canvas_id.clone(), handle);
        Ok(RenderOutcome::Drawn)
    }

    /// Dispose every live chart.
    pub fn dispose_all(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        for (canvas, handle) in self.live.drain() {
            debug!(%canvas, "disposing chart");
            backend.dispose(handle);
        }
    }
}

impl<B: ChartBackend> Drop for ChartSink<B> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
