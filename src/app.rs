//! Root Dioxus application component
//!
//! Builds the session controller once, wires it to signal-backed rendering,
//! and provides both to the component tree.

use crate::session::client::ChatClient;
use crate::session::{ContextSummary, DownloadArtifact, Renderer, SessionController};
use crate::storage::history::SystemClock;
use crate::storage::kv::{FileStore, MemoryStore};
use crate::storage::preferences::PreferenceStore;
use crate::storage::{get_data_dir, KeyValueStore};
use crate::types::config::ClientConfig;
use crate::types::message::ChatTurn;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Values created before the window opens
#[derive(Clone)]
pub struct Bootstrap {
    pub config: ClientConfig,
    pub client: Arc<ChatClient>,
}

/// Reachability of the chat endpoint
#[derive(Clone, PartialEq, Debug)]
pub enum GatewayStatus {
    Unknown,
    Online,
    Offline,
}

/// Everything the components display, written by [`SignalRenderer`]
#[derive(Clone, Copy)]
pub struct ViewState {
    pub history: Signal<Vec<ChatTurn>>,
    pub context: Signal<Option<ContextSummary>>,
    pub download: Signal<Option<DownloadArtifact>>,
    pub busy: Signal<bool>,
    /// Newest first
    pub diagnostics: Signal<Vec<String>>,
    /// Bumped to recreate the file input after each exchange
    pub file_input_epoch: Signal<u32>,
    pub gateway: Signal<GatewayStatus>,
}

impl ViewState {
    fn new() -> Self {
        Self {
            history: Signal::new(Vec::new()),
            context: Signal::new(None),
            download: Signal::new(None),
            busy: Signal::new(false),
            diagnostics: Signal::new(Vec::new()),
            file_input_epoch: Signal::new(0),
            gateway: Signal::new(GatewayStatus::Unknown),
        }
    }

    pub fn push_diagnostic(&mut self, line: String) {
        let mut lines = self.diagnostics.write();
        lines.insert(0, line);
        lines.truncate(200);
    }
}

struct SignalRenderer {
    view: ViewState,
}

impl Renderer for SignalRenderer {
    fn render_history(&mut self, turns: &[ChatTurn]) {
        self.view.history.set(turns.to_vec());
    }

    fn render_context(&mut self, summary: &ContextSummary) {
        self.view.context.set(Some(summary.clone()));
    }

    fn render_download(&mut self, artifact: Option<&DownloadArtifact>) {
        self.view.download.set(artifact.cloned());
    }

    fn render_busy(&mut self, busy: bool) {
        self.view.busy.set(busy);
    }

    fn render_diagnostic(&mut self, line: &str) {
        self.view.push_diagnostic(line.to_string());
    }

    fn reset_file_input(&mut self) {
        *self.view.file_input_epoch.write() += 1;
    }
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<SessionController>>,
    pub client: Arc<ChatClient>,
    pub view: ViewState,
}

impl AppState {
    pub fn new(bootstrap: &Bootstrap) -> Self {
        let view = ViewState::new();
        let prefs = PreferenceStore::new(open_store(&bootstrap.config));
        let session = SessionController::new(
            prefs,
            bootstrap.client.clone(),
            Box::new(SignalRenderer { view }),
            Arc::new(SystemClock),
        );
        tracing::info!("AppState initialized");

        Self {
            session: Arc::new(Mutex::new(session)),
            client: bootstrap.client.clone(),
            view,
        }
    }
}

fn open_store(config: &ClientConfig) -> Box<dyn KeyValueStore> {
    let dir = match config.data_dir.clone() {
        Some(dir) => Ok(dir),
        None => get_data_dir(),
    };
    match dir {
        Ok(dir) => Box::new(FileStore::open(&dir)),
        Err(e) => {
            tracing::warn!("Preferences will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[component]
pub fn App() -> Element {
    let bootstrap = use_context::<Bootstrap>();
    let app_state = use_context_provider(|| AppState::new(&bootstrap));

    {
        let client = app_state.client.clone();
        let mut gateway = app_state.view.gateway;
        use_effect(move || {
            let client = client.clone();
            spawn(async move {
                let health = client.health().await;
                tracing::info!("Gateway health: ok={} {}", health.ok, health.detail);
                gateway.set(if health.ok {
                    GatewayStatus::Online
                } else {
                    GatewayStatus::Offline
                });
            });
        });
    }

    rsx! {
        Layout {}
    }
}
