//! Bar-chart requests and the Chart.js-shaped configuration built from them.

use serde::Serialize;

use crate::error::{ChartError, ChartResult};

// ── Request ────────────────────────────────────────────────────────

/// Which axis carries the categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Bars grow left to right; categories on the y axis.
    Horizontal,
    /// Bars grow bottom to top; categories on the x axis.
    Vertical,
}

impl Orientation {
    /// Chart.js `indexAxis` value.
    #[must_use]
    pub const fn index_axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Y,
            Self::Vertical => Axis::X,
        }
    }

    /// The axis anchored at zero: the category axis for horizontal bars,
    /// the value axis for vertical bars.
    #[must_use]
    pub const fn zero_based_axis(self) -> Axis {
        match self {
            Self::Horizontal => self.index_axis(),
            Self::Vertical => Axis::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Colours and stroke shared by every chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartStyle {
    pub background: String,
    pub border: String,
    pub border_width: u32,
    pub tick_color: String,
    pub grid_color: String,
}

impl ChartStyle {
    #[must_use]
    pub fn with_colors(background: impl Into<String>, border: impl Into<String>) -> Self {
        Self {
            background: background.into(),
            border: border.into(),
            ..Self::default()
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: "rgba(54, 162, 235, 0.5)".into(),
            border: "rgba(54, 162, 235, 1)".into(),
            border_width: 1,
            tick_color: "#ccc".into(),
            grid_color: "rgba(255,255,255,0.1)".into(),
        }
    }
}

/// One bar chart to draw onto the canvas with `canvas_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub canvas_id: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub series_label: String,
    pub title: String,
    pub orientation: Orientation,
    pub style: ChartStyle,
}

impl ChartRequest {
    /// # Errors
    ///
    /// [`ChartError::LengthMismatch`] when labels and values differ in length.
    pub fn check(&self) -> ChartResult<()> {
        if self.labels.len() == self.values.len() {
            Ok(())
        } else {
            Err(ChartError::LengthMismatch {
                labels: self.labels.len(),
                values: self.values.len(),
            })
        }
    }

    #[must_use]
    pub fn config(&self) -> BarChartConfig {
        let zero_axis = self.orientation.zero_based_axis();
        let scale = |axis: Axis| Scale {
            begin_at_zero: axis == zero_axis,
            ticks: ColorOption {
                color: self.style.tick_color.clone(),
            },
            grid: ColorOption {
                color: self.style.grid_color.clone(),
            },
        };

        BarChartConfig {
            kind: "bar",
            data: ChartData {
                labels: self.labels.clone(),
                datasets: vec![Dataset {
                    label: self.series_label.clone(),
                    data: self.values.clone(),
                    background_color: self.style.background.clone(),
                    border_color: self.style.border.clone(),
                    border_width: self.style.border_width,
                }],
            },
            options: ChartOptions {
                index_axis: self.orientation.index_axis(),
                responsive: true,
                maintain_aspect_ratio: false,
                scales: Scales {
                    x: scale(Axis::X),
                    y: scale(Axis::Y),
                },
                plugins: Plugins {
                    legend: Toggle { display: false },
                    title: Title {
                        display: true,
                        text: self.title.clone(),
                    },
                },
            },
        }
    }
}

// ── Chart.js configuration ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub index_axis: Axis,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Scale,
    pub y: Scale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scale {
    pub begin_at_zero: bool,
    pub ticks: ColorOption,
    pub grid: ColorOption,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorOption {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Toggle,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn request(orientation: Orientation) -> ChartRequest {
        ChartRequest {
            canvas_id: "oCountByTagsChart".into(),
            labels: vec!["A".into(), "B".into()],
            values: vec![2, 1],
            series_label: "Tag Count".into(),
            title: "O-Count by Tag".into(),
            orientation,
            style: ChartStyle::default(),
        }
    }

    #[test]
    fn horizontal_config_matches_chartjs_shape() {
        let config = serde_json::to_value(request(Orientation::Horizontal).config()).unwrap();
        assert_eq!(
            config,
            json!({
                "type": "bar",
                "data": {
                    "labels": ["A", "B"],
                    "datasets": [{
                        "label": "Tag Count",
                        "data": [2, 1],
                        "backgroundColor": "rgba(54, 162, 235, 0.5)",
                        "borderColor": "rgba(54, 162, 235, 1)",
                        "borderWidth": 1
                    }]
                },
                "options": {
                    "indexAxis": "y",
                    "responsive": true,
                    "maintainAspectRatio": false,
                    "scales": {
                        "x": {
                            "beginAtZero": false,
                            "ticks": { "color": "#ccc" },
                            "grid": { "color": "rgba(255,255,255,0.1)" }
                        },
                        "y": {
                            "beginAtZero": true,
                            "ticks": { "color": "#ccc" },
                            "grid": { "color": "rgba(255,255,255,0.1)" }
                        }
                    },
                    "plugins": {
                        "legend": { "display": false },
                        "title": { "display": true, "text": "O-Count by Tag" }
                    }
                }
            })
        );
    }

    #[rstest]
    #[case(Orientation::Horizontal, Axis::Y, false, true)]
    #[case(Orientation::Vertical, Axis::X, false, true)]
    fn zero_based_axis_per_orientation(
        #[case] orientation: Orientation,
        #[case] index_axis: Axis,
        #[case] x_zero: bool,
        #[case] y_zero: bool,
    ) {
        let config = request(orientation).config();
        assert_eq!(config.options.index_axis, index_axis);
        assert_eq!(config.options.scales.x.begin_at_zero, x_zero);
        assert_eq!(config.options.scales.y.begin_at_zero, y_zero);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let mut req = request(Orientation::Vertical);
        req.values.push(7);
        assert!(matches!(
            req.check(),
            Err(ChartError::LengthMismatch { labels: 2, values: 3 })
        ));
    }
}
