//! Path polling for hosts without navigation events.

use std::sync::Arc;
use std::time::Duration;

use tally_view::Anchor;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::host::HostPage;

/// Polls [`HostPage::current_path`] and emits the anchor once per arrival at
/// the watched path.
///
/// Staying on the path emits nothing further; leaving and coming back emits
/// again. If the anchor is not on the page yet, the arrival is retried on the
/// next tick.
#[derive(Debug, Clone)]
pub struct PathPoller {
    path: String,
    selector: String,
    interval: Duration,
}

impl PathPoller {
    #[must_use]
    pub fn new(path: impl Into<String>, selector: impl Into<String>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            selector: selector.into(),
            interval,
        }
    }

    /// Start polling on the current tokio runtime. Polling stops once the
    /// returned receiver is dropped.
    pub fn spawn<H: HostPage + 'static>(self, host: Arc<H>) -> UnboundedReceiver<Anchor> {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut on_path = false;

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                let path = host.current_path();
                trace!(%path, "polled path");
                if path != self.path {
                    on_path = false;
                    continue;
                }
                if on_path {
                    continue;
                }
                let Some(anchor) = host.query_anchor(&self.selector) else {
                    debug!(selector = %self.selector, "anchor not on page yet");
                    continue;
                };
                on_path = true;
                if tx.send(anchor).is_err() {
                    break;
                }
            }
            debug!(path = %self.path, "path poller stopped");
        });
        rx
    }
}
