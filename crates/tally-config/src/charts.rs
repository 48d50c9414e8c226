//! Chart ids, limits and colours.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of tags shown in the tag chart.
const fn default_tag_limit() -> usize {
    15
}

/// Default bar area width for the terminal backend, in cells.
const fn default_text_width() -> usize {
    40
}

fn default_tag_canvas_id() -> String {
    String::from("oCountByTagsChart")
}

fn default_year_canvas_id() -> String {
    String::from("ocountByDateChart")
}

fn default_tag_colors() -> ColorPair {
    ColorPair {
        background: "rgba(54, 162, 235, 0.5)".into(),
        border: "rgba(54, 162, 235, 1)".into(),
    }
}

fn default_year_colors() -> ColorPair {
    ColorPair {
        background: "rgba(75, 192, 192, 0.5)".into(),
        border: "rgba(75, 192, 192, 1)".into(),
    }
}

/// Fill and outline colour for one dataset, as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorPair {
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartsConfig {
    #[serde(default = "default_tag_limit")]
    pub tag_limit: usize,

    #[serde(default = "default_tag_canvas_id")]
    pub tag_canvas_id: String,

    #[serde(default = "default_year_canvas_id")]
    pub year_canvas_id: String,

    #[serde(default = "default_tag_colors")]
    pub tag_colors: ColorPair,

    #[serde(default = "default_year_colors")]
    pub year_colors: ColorPair,

    #[serde(default = "default_text_width")]
    pub text_width: usize,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            tag_limit: default_tag_limit(),
            tag_canvas_id: default_tag_canvas_id(),
            year_canvas_id: default_year_canvas_id(),
            tag_colors: default_tag_colors(),
            year_colors: default_year_colors(),
            text_width: default_text_width(),
        }
    }
}

impl ChartsConfig {
    /// Reject settings that would mount both charts on one canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a canvas id is blank or
    /// both charts share one id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, id) in [
            ("charts.tag_canvas_id", &self.tag_canvas_id),
            ("charts.year_canvas_id", &self.year_canvas_id),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must not be empty".into(),
                });
            }
        }
        if self.tag_canvas_id == self.year_canvas_id {
            return Err(ConfigError::InvalidValue {
                field: "charts.year_canvas_id".into(),
                reason: format!("must differ from tag_canvas_id ('{}')", self.tag_canvas_id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ChartsConfig::default();
        assert_eq!(config.tag_limit, 15);
        assert_eq!(config.tag_canvas_id, "oCountByTagsChart");
        assert_eq!(config.year_canvas_id, "ocountByDateChart");
        assert_eq!(config.tag_colors.border, "rgba(54, 162, 235, 1)");
        assert_eq!(config.text_width, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_shared_canvas_id() {
        let config = ChartsConfig {
            year_canvas_id: "oCountByTagsChart".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "charts.year_canvas_id")
        );
    }

    #[test]
    fn validate_rejects_blank_canvas_id() {
        let config = ChartsConfig {
            tag_canvas_id: " ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
