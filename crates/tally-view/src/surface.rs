//! Mount surface: the host anchor and the container the view owns inside it.
//!
//! The host hands out an [`Anchor`]; the view finds or appends its
//! [`Container`] under it by stable id and replaces the container's
//! [`Content`] wholesale on every state change. Content can be rendered as
//! HTML markup (for a browser host) or as plain text (for a terminal host).

use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const HEADING: &str = "O-Count Statistics";
pub const LOADING_TEXT: &str = "Loading statistics...";
pub const ERROR_HEADING: &str = "Error loading statistics:";

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// What a chart backend left on a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawing {
    /// Pre-rendered text art.
    Text(String),
    /// Script that draws the chart when the markup is loaded in a browser.
    Script(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    /// A chart canvas, blank until a backend draws on it.
    Canvas(Option<Drawing>),
    /// Plain-text notice shown instead of a chart.
    Notice(Vec<String>),
}

/// One chart slot in the container, addressed by its canvas id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub canvas_id: String,
    pub body: PanelBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Empty,
    Loading,
    Charts(Vec<Panel>),
    Error { message: String },
}

/// The element the view owns under the host anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub content: Content,
}

impl Container {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Content::Empty,
        }
    }

    pub fn show_loading(&mut self) {
        self.content = Content::Loading;
    }

    /// Replace the content with one blank canvas per id.
    pub fn show_canvases(&mut self, canvas_ids: &[&str]) {
        self.content = Content::Charts(
            canvas_ids
                .iter()
                .map(|id| Panel {
                    canvas_id: (*id).to_string(),
                    body: PanelBody::Canvas(None),
                })
                .collect(),
        );
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.content = Content::Error {
            message: message.into(),
        };
    }

    #[must_use]
    pub fn panel(&self, canvas_id: &str) -> Option<&Panel> {
        match &self.content {
            Content::Charts(panels) => panels.iter().find(|p| p.canvas_id == canvas_id),
            _ => None,
        }
    }

    pub fn panel_mut(&mut self, canvas_id: &str) -> Option<&mut Panel> {
        match &mut self.content {
            Content::Charts(panels) => panels.iter_mut().find(|p| p.canvas_id == canvas_id),
            _ => None,
        }
    }

    /// Markup for a browser host.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!("<div id=\"{}\">", escape_html(&self.id));
        let heading = format!("<h2 style=\"text-align: center;\">{HEADING}</h2>");
        match &self.content {
            Content::Empty => {}
            Content::Loading => {
                let _ = write!(html, "{heading}<p>{LOADING_TEXT}</p>");
            }
            Content::Charts(panels) => {
                let _ = write!(html, "{heading}<div class=\"row\">");
                for panel in panels {
                    html.push_str("<div class=\"col-md-6 mb-3\">");
                    html.push_str("<div style=\"position: relative; height:400px\">");
                    panel_html(&mut html, panel);
                    html.push_str("</div></div>");
                }
                html.push_str("</div>");
            }
            Content::Error { message } => {
                let _ = write!(
                    html,
                    "<h2 style=\"color: red;\">{ERROR_HEADING}</h2><p>{}</p>",
                    escape_html(message)
                );
            }
        }
        html.push_str("</div>");
        html
    }

    /// Plain-text rendering for a terminal host.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let rule = "=".repeat(HEADING.len());
        match &self.content {
            Content::Empty => {}
            Content::Loading => {
                let _ = writeln!(text, "{HEADING}\n{rule}\n{LOADING_TEXT}");
            }
            Content::Charts(panels) => {
                let _ = writeln!(text, "{HEADING}\n{rule}");
                for panel in panels {
                    text.push('\n');
                    match &panel.body {
                        PanelBody::Canvas(Some(Drawing::Text(art))) => text.push_str(art),
                        PanelBody::Canvas(Some(Drawing::Script(_))) => {
                            let _ = writeln!(text, "[chart {} drawn by script]", panel.canvas_id);
                        }
                        PanelBody::Canvas(None) => {
                            let _ = writeln!(text, "[chart {} not drawn]", panel.canvas_id);
                        }
                        PanelBody::Notice(lines) => {
                            for line in lines {
                                let _ = writeln!(text, "{line}");
                            }
                        }
                    }
                }
            }
            Content::Error { message } => {
                let _ = writeln!(text, "{ERROR_HEADING}\n{message}");
            }
        }
        text
    }
}

fn panel_html(html: &mut String, panel: &Panel) {
    let id = escape_html(&panel.canvas_id);
    match &panel.body {
        PanelBody::Canvas(drawing) => {
            let _ = write!(html, "<canvas id=\"{id}\"></canvas>");
            match drawing {
                Some(Drawing::Script(script)) => {
                    let _ = write!(html, "<script>{script}</script>");
                }
                Some(Drawing::Text(art)) => {
                    let _ = write!(html, "<pre>{}</pre>", escape_html(art));
                }
                None => {}
            }
        }
        PanelBody::Notice(lines) => {
            for (index, line) in lines.iter().enumerate() {
                if index == 0 {
                    let _ = write!(html, "<p style=\"color: yellow;\">{}</p>", escape_html(line));
                } else {
                    let _ = write!(html, "<p>{}</p>", escape_html(line));
                }
            }
        }
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Anchor
// ---------------------------------------------------------------------------

/// Host element the view appends its container under.
///
/// Cloning shares the same element. Only containers are modelled; the host's
/// own children are not visible here.
#[derive(Debug, Clone)]
pub struct Anchor {
    selector: String,
    children: Arc<Mutex<Vec<Container>>>,
}

impl Anchor {
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            children: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Whether two handles refer to the same element.
    #[must_use]
    pub fn same_element(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.children, &other.children)
    }

    /// Run `f` on the container with `id`, appending an empty one first if
    /// none exists.
    pub fn with_container<R>(&self, id: &str, f: impl FnOnce(&mut Container) -> R) -> R {
        let mut children = self.lock();
        let index = if let Some(index) = children.iter().position(|c| c.id == id) {
            index
        } else {
            children.push(Container::new(id));
            children.len() - 1
        };
        f(&mut children[index])
    }

    /// Snapshot of the container with `id`, if present.
    #[must_use]
    pub fn container(&self, id: &str) -> Option<Container> {
        self.lock().iter().find(|c| c.id == id).cloned()
    }

    /// Number of containers carrying `id`.
    #[must_use]
    pub fn count_containers(&self, id: &str) -> usize {
        self.lock().iter().filter(|c| c.id == id).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Container>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
