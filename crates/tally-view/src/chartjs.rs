//! Browser backend: attaches a Chart.js bootstrap script to each canvas.

use tracing::trace;

use crate::chart::BarChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::sink::ChartBackend;
use crate::surface::Drawing;

/// Handle for a chart created by [`ChartJsBackend`]; names its canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartJsHandle {
    pub canvas_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChartJsBackend {
    created: u64,
    disposed: u64,
}

impl ChartJsBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Charts created and not yet disposed.
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.created.saturating_sub(self.disposed)
    }

    /// Charts disposed over the backend's lifetime.
    #[must_use]
    pub const fn disposed(&self) -> u64 {
        self.disposed
    }
}

impl ChartBackend for ChartJsBackend {
    type Handle = ChartJsHandle;

    fn create(
        &mut self,
        canvas_id: &str,
        config: &BarChartConfig,
    ) -> ChartResult<(ChartJsHandle, Drawing)> {
        let config = script_json(config)?;
        let canvas = script_json(&canvas_id)?;
        let script = format!(
            "(function(){{var ctx=document.getElementById({canvas});if(!ctx)return;\
             if(ctx.chart){{ctx.chart.destroy();}}ctx.chart=new Chart(ctx,{config});}})();"
        );
        self.created += 1;
        trace!(canvas = canvas_id, "chart script attached");
        Ok((
            ChartJsHandle {
                canvas_id: canvas_id.to_string(),
            },
            Drawing::Script(script),
        ))
    }

    fn dispose(&mut self, handle: ChartJsHandle) {
        trace!(canvas = %handle.canvas_id, "chart disposed");
        self.disposed += 1;
    }
}

/// JSON literal safe to embed inside a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> ChartResult<String> {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .map_err(|e| ChartError::Backend(e.to_string()))
}
