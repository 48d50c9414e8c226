//! Where and when the statistics view mounts into the host page.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_path() -> String {
    String::from("/stats")
}

fn default_anchor_selector() -> String {
    String::from("div.container-fluid div.mt-5")
}

fn default_container_id() -> String {
    String::from("ocount-stats-section")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// Navigation path that activates the view.
    #[serde(default = "default_path")]
    pub path: String,

    /// Host selector for the element the container is appended under.
    #[serde(default = "default_anchor_selector")]
    pub anchor_selector: String,

    /// Stable id of the mount container.
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Path poll interval used when the host has no navigation listener.
    /// Zero disables polling.
    #[serde(default)]
    pub poll_interval_ms: u64,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            anchor_selector: default_anchor_selector(),
            container_id: default_container_id(),
            poll_interval_ms: 0,
        }
    }
}

impl MountConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_ms > 0).then(|| Duration::from_millis(self.poll_interval_ms))
    }
}
