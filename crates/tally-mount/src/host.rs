//! What the view needs from the page it lives in.

use tally_view::Anchor;
use tokio::sync::mpsc::UnboundedReceiver;

/// The host single-page application.
pub trait HostPage: Send + Sync {
    /// Current navigation path, e.g. `/stats`.
    fn current_path(&self) -> String;

    /// Look up the element matching `selector` on the current page.
    fn query_anchor(&self, selector: &str) -> Option<Anchor>;

    /// Subscribe to navigations reaching `path`. Each time one happens the
    /// host sends the element matching `selector`.
    ///
    /// Returns `None` when the host has no navigation events to offer.
    fn path_element_listener(&self, path: &str, selector: &str)
    -> Option<UnboundedReceiver<Anchor>>;
}
