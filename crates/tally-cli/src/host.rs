//! Terminal stand-in for the host page.
//!
//! The "page" holds a single anchor element; navigation is a stream of paths,
//! normally one per stdin line.

use std::sync::{Arc, Mutex, PoisonError};

use tally_mount::HostPage;
use tally_view::Anchor;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, trace};

pub struct TerminalHost {
    path: Arc<Mutex<String>>,
    anchor: Anchor,
    navigation: Mutex<Option<UnboundedReceiver<String>>>,
}

impl TerminalHost {
    pub fn new(start: &str, anchor: Anchor, navigation: UnboundedReceiver<String>) -> Self {
        Self {
            path: Arc::new(Mutex::new(start.to_string())),
            anchor,
            navigation: Mutex::new(Some(navigation)),
        }
    }

    /// Host whose navigation stream is stdin, one path per line. Must be
    /// called from within a tokio runtime.
    pub fn from_stdin(start: &str, anchor: Anchor) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                if tx.send(path.to_string()).is_err() {
                    break;
                }
            }
            debug!("stdin closed");
        });
        Self::new(start, anchor, rx)
    }
}

impl HostPage for TerminalHost {
    fn current_path(&self) -> String {
        self.path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn query_anchor(&self, selector: &str) -> Option<Anchor> {
        (self.anchor.selector() == selector).then(|| self.anchor.clone())
    }

    fn path_element_listener(
        &self,
        path: &str,
        selector: &str,
    ) -> Option<UnboundedReceiver<Anchor>> {
        let anchor = self.query_anchor(selector)?;
        let mut navigation = self
            .navigation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let current = Arc::clone(&self.path);
        let watched = path.to_string();
        tokio::spawn(async move {
            while let Some(next) = navigation.recv().await {
                trace!(path = %next, "navigated");
                *current.lock().unwrap_or_else(PoisonError::into_inner) = next.clone();
                if next == watched && tx.send(anchor.clone()).is_err() {
                    break;
                }
            }
        });
        Some(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn forwards_only_matching_paths() {
        let (nav, rx) = mpsc::unbounded_channel();
        let host = TerminalHost::new("/", Anchor::new("main"), rx);
        let mut anchors = host.path_element_listener("/stats", "main").unwrap();

        for path in ["/scenes", "/stats", "/images", "/stats"] {
            nav.send(path.to_string()).unwrap();
        }
        drop(nav);

        let page_anchor = host.query_anchor("main").unwrap();
        let mut received = 0;
        while let Some(anchor) = anchors.recv().await {
            assert!(anchor.same_element(&page_anchor));
            received += 1;
        }
        assert_eq!(received, 2);
        assert_eq!(host.current_path(), "/stats");
    }

    #[tokio::test]
    async fn listener_is_handed_out_once() {
        let (_nav, rx) = mpsc::unbounded_channel();
        let host = TerminalHost::new("/", Anchor::new("main"), rx);
        assert!(host.path_element_listener("/stats", "main").is_some());
        assert!(host.path_element_listener("/stats", "main").is_none());
    }

    #[test]
    fn unknown_selector_has_no_anchor() {
        let (_nav, rx) = mpsc::unbounded_channel();
        let host = TerminalHost::new("/", Anchor::new("main"), rx);
        assert!(host.query_anchor("aside").is_none());
        assert_eq!(host.current_path(), "/");
    }
}
