//! Fake host page and media sources shared by the lifecycle tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tally_core::{ItemKind, RawItem};
use tally_query::{ItemPage, MarkCountFilter, MediaSource, QueryError};
use tally_view::Anchor;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, watch};

use tally_mount::{CycleReport, Phase};

pub const STATS_PATH: &str = "/stats";
pub const SELECTOR: &str = "div.container-fluid div.mt-5";

pub fn raw(id: &str, marks: Option<i64>, date: Option<&str>, tags: &[&str]) -> RawItem {
    let tags: Vec<_> = tags.iter().map(|t| json!({ "id": t, "name": t })).collect();
    serde_json::from_value(json!({
        "id": id,
        "o_counter": marks,
        "date": date,
        "tags": tags,
    }))
    .unwrap()
}

fn page(items: Vec<RawItem>) -> ItemPage {
    ItemPage {
        count: items.len() as u64,
        items,
    }
}

// ── Sources ────────────────────────────────────────────────────────

/// Returns the same pages on every call; optionally fails one kind.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub scenes: Vec<RawItem>,
    pub images: Vec<RawItem>,
    pub failing: Option<ItemKind>,
}

impl StaticSource {
    pub fn sample() -> Self {
        Self {
            scenes: vec![
                raw("1", Some(3), Some("2020-05-01"), &["A", "B"]),
                raw("2", Some(2), Some("2020-11-01"), &["A"]),
            ],
            images: vec![raw("1", Some(5), None, &["B"])],
            failing: None,
        }
    }
}

impl MediaSource for StaticSource {
    async fn find_items(
        &self,
        kind: ItemKind,
        _filter: &MarkCountFilter,
    ) -> Result<ItemPage, QueryError> {
        if self.failing == Some(kind) {
            return Err(QueryError::GraphQl {
                messages: vec![format!("{kind} filter rejected")],
            });
        }
        Ok(match kind {
            ItemKind::Scene => page(self.scenes.clone()),
            ItemKind::Image => page(self.images.clone()),
        })
    }
}

/// Scene fetches block until released; the released value names the single
/// tag on the single scene returned. Image fetches return nothing.
#[derive(Debug, Default)]
pub struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<&'static str>>>,
}

impl GatedSource {
    /// Create `n` gates; the returned senders release scene fetches in the
    /// order those fetches start.
    pub fn with_gates(n: usize) -> (Self, Vec<oneshot::Sender<&'static str>>) {
        let mut senders = Vec::new();
        let mut gates = VecDeque::new();
        for _ in 0..n {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            gates.push_back(rx);
        }
        (
            Self {
                gates: Mutex::new(gates),
            },
            senders,
        )
    }
}

impl MediaSource for GatedSource {
    async fn find_items(
        &self,
        kind: ItemKind,
        _filter: &MarkCountFilter,
    ) -> Result<ItemPage, QueryError> {
        if kind == ItemKind::Image {
            return Ok(page(vec![]));
        }
        let gate = self.gates.lock().unwrap().pop_front();
        let Some(gate) = gate else {
            return Err(QueryError::MissingData("no gate left".into()));
        };
        let tag = gate
            .await
            .map_err(|_| QueryError::MissingData("gate dropped".into()))?;
        Ok(page(vec![raw("1", Some(1), Some("2022-02-02"), &[tag])]))
    }
}

// ── Host ───────────────────────────────────────────────────────────

/// In-memory host page with an optional navigation-event channel.
#[derive(Debug)]
pub struct FakeHost {
    path: Mutex<String>,
    anchor: Option<Anchor>,
    with_listener: bool,
    subscribers: Mutex<Vec<(String, UnboundedSender<Anchor>)>>,
    subscriptions: AtomicUsize,
}

impl FakeHost {
    pub fn new(path: &str, with_listener: bool) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            anchor: Some(Anchor::new(SELECTOR)),
            with_listener,
            subscribers: Mutex::new(Vec::new()),
            subscriptions: AtomicUsize::new(0),
        }
    }

    pub fn without_anchor(path: &str) -> Self {
        Self {
            anchor: None,
            ..Self::new(path, false)
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor.clone().unwrap()
    }

    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Client-side navigation: update the path and notify subscribers.
    pub fn navigate(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_string();
        let Some(anchor) = &self.anchor else { return };
        for (watched, tx) in self.subscribers.lock().unwrap().iter() {
            if watched == path {
                let _ = tx.send(anchor.clone());
            }
        }
    }

    /// Drop all subscriptions, ending every navigation stream.
    pub fn close(&self) {
        self.subscribers.lock().unwrap().clear();
    }
}

impl tally_mount::HostPage for FakeHost {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn query_anchor(&self, selector: &str) -> Option<Anchor> {
        self.anchor.clone().filter(|a| a.selector() == selector)
    }

    fn path_element_listener(
        &self,
        path: &str,
        _selector: &str,
    ) -> Option<UnboundedReceiver<Anchor>> {
        if !self.with_listener {
            return None;
        }
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push((path.to_string(), tx));
        Some(rx)
    }
}

// ── Logs ───────────────────────────────────────────────────────────

/// In-memory log sink for a scoped `tracing` subscriber.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || sink.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ── Waiting ────────────────────────────────────────────────────────

/// Wait until cycle `generation` settles, returning its final phase.
pub async fn settled(reports: &mut watch::Receiver<CycleReport>, generation: u64) -> Phase {
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        reports.wait_for(|r| {
            r.generation == generation && matches!(r.phase, Phase::Rendered | Phase::Errored)
        }),
    )
    .await
    .expect("cycle should settle in time")
    .expect("coordinator dropped");
    report.phase
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
