//! Terminal backend: draws bar charts as unicode block text.

use std::fmt::Write as _;

use tracing::trace;

use crate::chart::{Axis, BarChartConfig};
use crate::error::{ChartError, ChartResult};
use crate::sink::ChartBackend;
use crate::surface::Drawing;

const FULL: char = '█';
const EIGHTHS: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const VERTICAL_HEIGHT: usize = 10;

#[derive(Debug, Clone)]
pub struct TextBackend {
    width: usize,
    next_handle: u64,
    live: usize,
}

impl TextBackend {
    /// `width` is the number of cells available to the longest bar.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self {
            width,
            next_handle: 0,
            live: 0,
        }
    }

    /// Charts created and not yet disposed.
    #[must_use]
    pub const fn live(&self) -> usize {
        self.live
    }

    fn horizontal(&self, config: &BarChartConfig) -> String {
        let (labels, values) = series(config);
        let max = values.iter().copied().max().unwrap_or(0);
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for (label, value) in labels.iter().zip(values) {
            let bar = horizontal_bar(*value, max, self.width);
            let _ = writeln!(out, "{label:>label_width$} │{bar} {value}");
        }
        out
    }

    fn vertical(config: &BarChartConfig) -> String {
        let (labels, values) = series(config);
        let max = values.iter().copied().max().unwrap_or(0);
        let column = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(values.iter().map(|v| v.to_string().len()))
            .max()
            .unwrap_or(1);

        let heights: Vec<usize> = values
            .iter()
            .map(|v| scaled(*v, max, VERTICAL_HEIGHT))
            .collect();

        let mut out = String::new();
        let value_row: Vec<String> = values
            .iter()
            .map(|v| format!("{v:^column$}"))
            .collect();
        let _ = writeln!(out, "{}", value_row.join(" ").trim_end());
        for row in (1..=VERTICAL_HEIGHT).rev() {
            let cells: Vec<String> = heights
                .iter()
                .map(|h| {
                    let cell = if *h >= row { FULL } else { ' ' };
                    format!("{:^column$}", cell.to_string())
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join(" ").trim_end());
        }
        let _ = writeln!(out, "{}", "─".repeat((column + 1) * labels.len().max(1)));
        let label_row: Vec<String> = labels.iter().map(|l| format!("{l:^column$}")).collect();
        let _ = writeln!(out, "{}", label_row.join(" ").trim_end());
        out
    }
}

impl Default for TextBackend {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartBackend for TextBackend {
    type Handle = u64;

    fn create(&mut self, canvas_id: &str, config: &BarChartConfig) -> ChartResult<(u64, Drawing)> {
        if config.data.datasets.len() != 1 {
            return Err(ChartError::Backend(format!(
                "expected one dataset, got {}",
                config.data.datasets.len()
            )));
        }
        let title = &config.options.plugins.title.text;
        let mut art = format!("{title}\n{}\n", "-".repeat(title.chars().count()));
        if config.data.labels.is_empty() {
            art.push_str("(no data)\n");
        } else {
            match config.options.index_axis {
                Axis::Y => art.push_str(&self.horizontal(config)),
                Axis::X => art.push_str(&Self::vertical(config)),
            }
        }

        self.next_handle += 1;
        self.live += 1;
        trace!(canvas = canvas_id, handle = self.next_handle, "text chart created");
        Ok((self.next_handle, Drawing::Text(art)))
    }

    fn dispose(&mut self, handle: u64) {
        trace!(handle, "text chart disposed");
        self.live = self.live.saturating_sub(1);
    }
}

fn series(config: &BarChartConfig) -> (&[String], &[u64]) {
    let values = config
        .data
        .datasets
        .first()
        .map_or(&[][..], |d| d.data.as_slice());
    (&config.data.labels, values)
}

/// Scale `value` into `0..=cells` relative to `max`.
fn scaled(value: u64, max: u64, cells: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let cells = cells as u128;
    usize::try_from(u128::from(value) * cells / u128::from(max)).unwrap_or(0)
}

fn horizontal_bar(value: u64, max: u64, width: usize) -> String {
    let eighths = scaled(value, max, width * 8);
    let mut bar: String = std::iter::repeat_n(FULL, eighths / 8).collect();
    if eighths % 8 != 0 {
        bar.push(EIGHTHS[eighths % 8]);
    }
    bar
}
