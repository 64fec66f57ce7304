//! Conversation session
//!
//! The [`SessionController`] owns the preference store, the history log and
//! the pending attachment, and runs one request/response exchange per send.
//! It only talks to the outside world through [`Renderer`] and
//! [`client::ChatBackend`], so any UI shell can drive it through the `on_*`
//! command handlers.

pub mod attachment;
pub mod client;
pub mod composer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use attachment::{Attachment, AttachmentError};
use client::{ChatBackend, ChatError, ChatMessage, ChatRequest, TEMPERATURE};

use crate::storage::history::{Clock, HistoryLog};
use crate::storage::preferences::PreferenceStore;
use crate::types::config::MemoryScope;
use crate::types::message::{ChatTurn, Role};

/// Prefix of the assistant turn recorded when an exchange fails
pub const FAILURE_PREFIX: &str = "❌ Error: ";

/// File name offered for the downloadable answer
pub const DOWNLOAD_FILE_NAME: &str = "answer.txt";

// ============================================================================
// Capabilities
// ============================================================================

/// Everything the controller needs to show
pub trait Renderer {
    fn render_history(&mut self, turns: &[ChatTurn]);
    fn render_context(&mut self, summary: &ContextSummary);
    /// `None` hides the download affordance
    fn render_download(&mut self, artifact: Option<&DownloadArtifact>);
    fn render_busy(&mut self, busy: bool);
    fn render_diagnostic(&mut self, line: &str);
    /// Forget the file picked in the attach control
    fn reset_file_input(&mut self);
}

// ============================================================================
// Session types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

/// What a call to [`SessionController::send`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty prompt or a send already in flight
    Ignored,
    Answered(String),
    Failed(String),
}

/// Preference and attachment overview shown next to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
    pub memory_scope: MemoryScope,
    pub websearch: bool,
    /// `None` when the endpoint picks the model
    pub model: Option<String>,
    /// Stored manual choice, kept while automatic selection is on
    pub selected_model: String,
    pub attachment_name: Option<String>,
    pub attachment_chars: Option<usize>,
    pub logged_in: bool,
}

impl ContextSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Memory: {}", self.memory_scope.as_str()),
            format!("Websearch: {}", if self.websearch { "on" } else { "off" }),
            format!("Model: {}", self.model.as_deref().unwrap_or("auto")),
        ];
        if let Some(chars) = self.attachment_chars {
            lines.push(format!("Attached TXT: {} chars", chars));
        }
        lines
    }
}

/// The last answer, offered as a plain-text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime: String,
    pub content: String,
}

impl DownloadArtifact {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME.to_string(),
            mime: "text/plain;charset=utf-8".to_string(),
            content: content.into(),
        }
    }

    /// Write the artifact into `dir`, returning the written path
    pub async fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.content).await?;
        Ok(path)
    }
}

/// A request built by [`SessionController::begin_send`], ready to go out
pub struct PendingExchange {
    backend: Arc<dyn ChatBackend>,
    request: ChatRequest,
    api_key: Option<String>,
}

impl PendingExchange {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Call the endpoint. No timeout: waits until the call settles.
    pub async fn dispatch(self) -> Result<String, ChatError> {
        self.backend.chat(&self.request, self.api_key.as_deref()).await
    }
}

/// A single preference edit coming from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceChange {
    AutoModel(bool),
    Model(String),
    Memory(MemoryScope),
    Websearch(bool),
}

// ============================================================================
// Controller
// ============================================================================

pub struct SessionController {
    prefs: PreferenceStore,
    history: HistoryLog,
    backend: Arc<dyn ChatBackend>,
    renderer: Box<dyn Renderer>,
    attachment: Option<Attachment>,
    download: Option<DownloadArtifact>,
    state: SessionState,
}

impl SessionController {
    /// Build the session, prune and load the history, and render the initial view
    pub fn new(
        mut prefs: PreferenceStore,
        backend: Arc<dyn ChatBackend>,
        renderer: Box<dyn Renderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut history = HistoryLog::new(clock);
        let loaded = history.load(&mut prefs).len();
        tracing::info!("Session started with {} chat turns", loaded);

        let mut session = Self {
            prefs,
            history,
            backend,
            renderer,
            attachment: None,
            download: None,
            state: SessionState::Idle,
        };
        session.refresh();
        session
    }

    /// Re-render everything
    pub fn refresh(&mut self) {
        self.renderer.render_history(self.history.turns());
        self.renderer.render_download(self.download.as_ref());
        self.render_context();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &[ChatTurn] {
        self.history.turns()
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.prefs
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn download_artifact(&self) -> Option<&DownloadArtifact> {
        self.download.as_ref()
    }

    pub fn context_summary(&self) -> ContextSummary {
        let prefs = self.prefs.session_preferences();
        ContextSummary {
            memory_scope: prefs.memory_scope,
            websearch: prefs.websearch,
            model: prefs.requested_model().map(str::to_string),
            selected_model: prefs.model.clone(),
            attachment_name: self.attachment.as_ref().map(|a| a.name.clone()),
            attachment_chars: self.attachment.as_ref().map(Attachment::len),
            logged_in: prefs.api_key.is_some(),
        }
    }

    fn render_context(&mut self) {
        let summary = self.context_summary();
        self.renderer.render_context(&summary);
    }

    fn diagnostic(&mut self, message: &str) {
        let now = chrono::Local::now().format("%H:%M:%S");
        self.renderer.render_diagnostic(&format!("[{}] {}", now, message));
    }

    // ------------------------------------------------------------------------
    // Command handlers
    // ------------------------------------------------------------------------

    pub async fn on_send_clicked(&mut self, user_text: &str) -> SendOutcome {
        self.send(user_text).await
    }

    pub fn on_preference_changed(&mut self, change: PreferenceChange) {
        tracing::debug!("Preference changed: {:?}", change);
        match change {
            PreferenceChange::AutoModel(auto) => self.prefs.set_auto_model(auto),
            PreferenceChange::Model(model) => self.prefs.set_model(&model),
            PreferenceChange::Memory(scope) => self.prefs.set_memory_scope(scope),
            PreferenceChange::Websearch(enabled) => self.prefs.set_websearch(enabled),
        }
        self.render_context();
    }

    pub fn on_save_api_key(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.prefs.set_api_key(key);
        tracing::info!("API key saved");
        self.render_context();
    }

    pub fn on_logout(&mut self) {
        self.prefs.clear_api_key();
        tracing::info!("API key removed");
        self.render_context();
    }

    pub fn on_new_chat(&mut self) {
        self.history.clear(&mut self.prefs);
        self.download = None;
        self.renderer.render_download(None);
        self.renderer.render_history(self.history.turns());
    }

    /// Replace the pending attachment. A rejected file leaves no attachment.
    pub fn on_attach(&mut self, picked: Result<Attachment, AttachmentError>) {
        self.attachment = None;
        match picked {
            Ok(attachment) => {
                tracing::debug!("Attached {} ({} chars)", attachment.name, attachment.len());
                self.attachment = Some(attachment);
            }
            Err(e) => {
                tracing::warn!("Attachment rejected: {}", e);
                self.diagnostic(&e.to_string());
            }
        }
        self.render_context();
    }

    // ------------------------------------------------------------------------
    // Exchange
    // ------------------------------------------------------------------------

    /// Run one exchange with the chat endpoint.
    ///
    /// Every failure ends up as an assistant turn; nothing is returned as an error.
    pub async fn send(&mut self, user_text: &str) -> SendOutcome {
        let Some(pending) = self.begin_send(user_text) else {
            return SendOutcome::Ignored;
        };
        let result = pending.dispatch().await;
        self.finish_send(result)
    }

    /// First half of [`send`](Self::send): record the user turn and build the request.
    ///
    /// Returns `None` for an empty prompt or while another exchange is in flight.
    /// Shells that must not hold the session across the network call await
    /// [`PendingExchange::dispatch`] themselves and hand the result to
    /// [`finish_send`](Self::finish_send).
    pub fn begin_send(&mut self, user_text: &str) -> Option<PendingExchange> {
        let text = user_text.trim();
        if text.is_empty() || self.state == SessionState::Sending {
            return None;
        }

        self.state = SessionState::Sending;
        self.renderer.render_busy(true);

        let attached = self.attachment.as_ref().map(|a| a.text.as_str());
        let entry = composer::history_entry(text, attached);
        let request = self.build_request(text);

        self.history.append(&mut self.prefs, Role::User, entry);
        self.renderer.render_history(self.history.turns());
        self.download = None;
        self.renderer.render_download(None);
        self.diagnostic("(sending request…)");

        Some(PendingExchange {
            backend: self.backend.clone(),
            request,
            api_key: self.prefs.api_key(),
        })
    }

    /// Second half of [`send`](Self::send): record the answer or the failure.
    pub fn finish_send(&mut self, result: Result<String, ChatError>) -> SendOutcome {
        let outcome = match result {
            Ok(answer) => {
                self.history.append(&mut self.prefs, Role::Assistant, answer.clone());
                self.renderer.render_history(self.history.turns());
                self.download = Some(DownloadArtifact::plain_text(answer.clone()));
                self.renderer.render_download(self.download.as_ref());
                self.diagnostic("OK");
                SendOutcome::Answered(answer)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!("Chat request failed: {}", message);
                self.history.append(
                    &mut self.prefs,
                    Role::Assistant,
                    format!("{}{}", FAILURE_PREFIX, message),
                );
                self.renderer.render_history(self.history.turns());
                self.diagnostic(&format!("Error: {}", message));
                SendOutcome::Failed(message)
            }
        };

        // The attachment is single-use whatever the outcome
        self.attachment = None;
        self.renderer.reset_file_input();
        self.render_context();
        self.state = SessionState::Idle;
        self.renderer.render_busy(false);
        outcome
    }

    fn build_request(&self, text: &str) -> ChatRequest {
        let prefs = self.prefs.session_preferences();
        let content = composer::compose(text, self.attachment.as_ref().map(|a| a.text.as_str()));
        ChatRequest {
            messages: vec![ChatMessage {
                role: Role::User.as_str().to_string(),
                content,
            }],
            temperature: TEMPERATURE,
            model: prefs.requested_model().map(str::to_string),
            memory_scope: prefs.memory_scope.as_str().to_string(),
            websearch: prefs.websearch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::client::{ChatClient, EMPTY_RESPONSE};
    use super::*;
    use crate::storage::history::ManualClock;
    use crate::storage::kv::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const NOW: i64 = 1_760_000_000_000;

    #[derive(Default)]
    struct Recorded {
        history: Vec<ChatTurn>,
        context: Option<ContextSummary>,
        download: Option<DownloadArtifact>,
        busy_changes: Vec<bool>,
        diagnostics: Vec<String>,
        file_input_resets: usize,
    }

    #[derive(Clone, Default)]
    struct RecordingRenderer(Arc<Mutex<Recorded>>);

    impl Renderer for RecordingRenderer {
        fn render_history(&mut self, turns: &[ChatTurn]) {
            self.0.lock().unwrap().history = turns.to_vec();
        }
        fn render_context(&mut self, summary: &ContextSummary) {
            self.0.lock().unwrap().context = Some(summary.clone());
        }
        fn render_download(&mut self, artifact: Option<&DownloadArtifact>) {
            self.0.lock().unwrap().download = artifact.cloned();
        }
        fn render_busy(&mut self, busy: bool) {
            self.0.lock().unwrap().busy_changes.push(busy);
        }
        fn render_diagnostic(&mut self, line: &str) {
            self.0.lock().unwrap().diagnostics.push(line.to_string());
        }
        fn reset_file_input(&mut self) {
            self.0.lock().unwrap().file_input_resets += 1;
        }
    }

    /// Backend answering from a fixed script and recording requests
    struct ScriptedBackend {
        reply: Result<String, (u16, String)>,
        requests: Mutex<Vec<(ChatRequest, Option<String>)>>,
    }

    impl ScriptedBackend {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(answer.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16, message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err((status, message.to_string())),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(ChatRequest, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, request: &ChatRequest, api_key: Option<&str>) -> Result<String, ChatError> {
            self.requests
                .lock()
                .unwrap()
                .push((request.clone(), api_key.map(str::to_string)));
            match &self.reply {
                Ok(answer) => Ok(answer.clone()),
                Err((status, message)) => Err(ChatError::Status {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    fn session(backend: Arc<dyn ChatBackend>) -> (SessionController, RecordingRenderer) {
        let renderer = RecordingRenderer::default();
        let prefs = PreferenceStore::new(Box::new(MemoryStore::new()));
        let controller = SessionController::new(
            prefs,
            backend,
            Box::new(renderer.clone()),
            Arc::new(ManualClock::new(NOW)),
        );
        (controller, renderer)
    }

    fn attach(controller: &mut SessionController, text: &str) {
        controller.on_attach(Attachment::from_file("doc.txt", None, text));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_ignored() {
        let backend = ScriptedBackend::answering("unused");
        let (mut controller, renderer) = session(backend.clone());

        assert_eq!(controller.send("").await, SendOutcome::Ignored);
        assert_eq!(controller.send("   \n\t").await, SendOutcome::Ignored);

        assert!(controller.history().is_empty());
        assert!(backend.calls().is_empty());
        assert!(renderer.0.lock().unwrap().busy_changes.is_empty());
    }

    #[tokio::test]
    async fn test_second_send_while_in_flight_is_ignored() {
        let backend = ScriptedBackend::answering("done");
        let (mut controller, _renderer) = session(backend.clone());

        let pending = controller.begin_send("first").unwrap();
        assert_eq!(controller.state(), SessionState::Sending);
        assert!(controller.begin_send("second").is_none());
        assert_eq!(pending.request().messages[0].content, "first");

        let result = pending.dispatch().await;
        assert_eq!(controller.finish_send(result), SendOutcome::Answered("done".to_string()));
        assert_eq!(controller.state(), SessionState::Idle);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(controller.history().len(), 2);
    }

    #[tokio::test]
    async fn test_file_input_reset_after_every_exchange() {
        let backend = ScriptedBackend::failing(500, "overloaded");
        let (mut controller, renderer) = session(backend);

        controller.on_attach(Attachment::from_file("notes.pdf", Some("application/pdf"), "x"));
        assert!(controller.attachment().is_none());
        assert_eq!(renderer.0.lock().unwrap().file_input_resets, 0);

        controller.send("hi").await;
        assert_eq!(renderer.0.lock().unwrap().file_input_resets, 1);
        controller.send("again").await;
        assert_eq!(renderer.0.lock().unwrap().file_input_resets, 2);
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let backend = ScriptedBackend::answering("hello");
        let (mut controller, renderer) = session(backend.clone());

        let outcome = controller.on_send_clicked("hi").await;
        assert_eq!(outcome, SendOutcome::Answered("hello".to_string()));

        let history = controller.history();
        assert_eq!(history.len(), 2);
        assert_eq!((history[0].role, history[0].content.as_str()), (Role::User, "hi"));
        assert_eq!((history[1].role, history[1].content.as_str()), (Role::Assistant, "hello"));

        let artifact = controller.download_artifact().unwrap();
        assert_eq!(artifact.content, "hello");
        assert_eq!(artifact.file_name, DOWNLOAD_FILE_NAME);

        let recorded = renderer.0.lock().unwrap();
        assert_eq!(recorded.history.len(), 2);
        assert_eq!(recorded.download.as_ref().map(|d| d.content.as_str()), Some("hello"));
        assert_eq!(recorded.busy_changes, vec![true, false]);
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_failed_exchange_records_error_turn() {
        let backend = ScriptedBackend::failing(500, "overloaded");
        let (mut controller, renderer) = session(backend);

        let outcome = controller.send("hi").await;
        assert_eq!(outcome, SendOutcome::Failed("overloaded".to_string()));

        let history = controller.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "hi");
        assert_eq!(history[1].role, Role::Assistant);
        assert!(history[1].content.starts_with(FAILURE_PREFIX));
        assert!(history[1].content.contains("overloaded"));

        assert!(controller.download_artifact().is_none());
        assert!(renderer.0.lock().unwrap().download.is_none());
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_attachment_is_single_use() {
        for backend in [
            ScriptedBackend::answering("fine"),
            ScriptedBackend::failing(502, "bad gateway"),
        ] {
            let (mut controller, renderer) = session(backend.clone());
            attach(&mut controller, "attached body");
            assert!(controller.attachment().is_some());

            controller.send("read this").await;

            assert!(controller.attachment().is_none());
            let context = renderer.0.lock().unwrap().context.clone().unwrap();
            assert_eq!(context.attachment_chars, None);

            let calls = backend.calls();
            let content = &calls[0].0.messages[0].content;
            assert!(content.starts_with("read this"));
            assert!(content.ends_with("attached body"));
            assert_eq!(
                controller.history()[0].content,
                "read this\n\n[Attached TXT]\nattached body"
            );
        }
    }

    #[tokio::test]
    async fn test_request_reflects_preferences() {
        let backend = ScriptedBackend::answering("ok");
        let (mut controller, _renderer) = session(backend.clone());

        controller.send("one").await;
        controller.on_preference_changed(PreferenceChange::AutoModel(false));
        controller.on_preference_changed(PreferenceChange::Model("mixtral:8x7b".to_string()));
        controller.on_preference_changed(PreferenceChange::Memory(MemoryScope::Private));
        controller.on_preference_changed(PreferenceChange::Websearch(true));
        controller.on_save_api_key("  secret  ");
        controller.send("two").await;

        let calls = backend.calls();
        let (first, first_key) = &calls[0];
        assert_eq!(first.model, None);
        assert_eq!(first.memory_scope, "public");
        assert!(!first.websearch);
        assert_eq!(first.temperature, TEMPERATURE);
        assert_eq!(first_key, &None);

        let (second, second_key) = &calls[1];
        assert_eq!(second.model.as_deref(), Some("mixtral:8x7b"));
        assert_eq!(second.memory_scope, "private");
        assert!(second.websearch);
        assert_eq!(second_key.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_logout_and_new_chat() {
        let backend = ScriptedBackend::answering("ok");
        let (mut controller, renderer) = session(backend.clone());

        controller.on_save_api_key("secret");
        assert!(controller.context_summary().logged_in);
        controller.on_logout();
        assert!(!controller.context_summary().logged_in);
        assert_eq!(controller.preferences().api_key(), None);

        controller.send("hi").await;
        assert_eq!(backend.calls()[0].1, None);
        controller.on_new_chat();
        assert!(controller.history().is_empty());
        assert!(controller.download_artifact().is_none());
        let recorded = renderer.0.lock().unwrap();
        assert!(recorded.history.is_empty());
        assert!(recorded.download.is_none());
    }

    #[tokio::test]
    async fn test_rejected_attachment_goes_to_diagnostics() {
        let backend = ScriptedBackend::answering("ok");
        let (mut controller, renderer) = session(backend.clone());

        controller.on_attach(Attachment::from_file("image.png", Some("image/png"), ""));
        assert!(controller.attachment().is_none());
        {
            let recorded = renderer.0.lock().unwrap();
            assert!(recorded.diagnostics.last().unwrap().contains("image.png"));
        }

        assert_eq!(controller.send("still works").await, SendOutcome::Answered("ok".to_string()));
    }

    #[test]
    fn test_context_summary_lines() {
        let summary = ContextSummary {
            memory_scope: MemoryScope::Private,
            websearch: true,
            model: None,
            selected_model: "llama3:8b".to_string(),
            attachment_name: Some("a.txt".to_string()),
            attachment_chars: Some(12),
            logged_in: false,
        };
        assert_eq!(
            summary.lines(),
            vec!["Memory: private", "Websearch: on", "Model: auto", "Attached TXT: 12 chars"]
        );
    }

    #[tokio::test]
    async fn test_download_artifact_save() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = DownloadArtifact::plain_text("the answer");
        let path = artifact.save_to(dir.path()).await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "the answer");
    }

    // Against a real HTTP endpoint

    async fn http_session(server: &MockServer) -> (SessionController, RecordingRenderer) {
        let client = ChatClient::new(server.uri()).unwrap();
        session(Arc::new(client))
    }

    #[tokio::test]
    async fn test_http_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "hello"})))
            .expect(1)
            .mount(&server)
            .await;

        let (mut controller, _renderer) = http_session(&server).await;
        controller.send("hi").await;

        let contents: Vec<_> = controller.history().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "hello"]);
        assert!(controller.download_artifact().is_some());
    }

    #[tokio::test]
    async fn test_http_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "overloaded"})))
            .mount(&server)
            .await;

        let (mut controller, _renderer) = http_session(&server).await;
        controller.send("hi").await;

        let history = controller.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "hi");
        assert!(history[1].content.contains("overloaded"));
        assert!(controller.download_artifact().is_none());
    }

    #[tokio::test]
    async fn test_http_missing_answer_uses_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"raw": {}})))
            .mount(&server)
            .await;

        let (mut controller, _renderer) = http_session(&server).await;
        controller.send("hi").await;
        assert_eq!(controller.history()[1].content, EMPTY_RESPONSE);
    }

    #[tokio::test]
    async fn test_network_failure_becomes_turn() {
        let client = ChatClient::new("http://127.0.0.1:1").unwrap();
        let (mut controller, _renderer) = session(Arc::new(client));
        let outcome = controller.send("hi").await;
        assert!(matches!(outcome, SendOutcome::Failed(_)));
        assert!(controller.history()[1].content.starts_with(FAILURE_PREFIX));
    }
}
