//! Chat interface components
//!
//! Contains the main chat view, message display, and input components.

pub mod input;
pub mod message;

use crate::app::AppState;
use crate::session::attachment::Attachment;
use dioxus::prelude::*;
use input::ChatInput;
use message::MessageBubble;
use std::path::PathBuf;

#[component]
pub fn ChatView() -> Element {
    let app_state = use_context::<AppState>();
    let view = app_state.view;

    let handle_send = {
        let app_state = app_state.clone();
        move |text: String| {
            let state = app_state.clone();
            spawn(async move {
                let pending = state.session.lock().await.begin_send(&text);
                let Some(pending) = pending else {
                    return;
                };
                // Released while waiting so other controls stay usable
                let result = pending.dispatch().await;
                state.session.lock().await.finish_send(result);
            });
        }
    };

    let handle_attach = {
        let app_state = app_state.clone();
        move |path: PathBuf| {
            let state = app_state.clone();
            spawn(async move {
                let picked = Attachment::read_path(&path).await;
                state.session.lock().await.on_attach(picked);
            });
        }
    };

    let handle_save = move |_| {
        let Some(artifact) = view.download.read().clone() else {
            return;
        };
        let mut view = view;
        spawn(async move {
            let dir = download_dir();
            let line = match artifact.save_to(&dir).await {
                Ok(path) => format!("Saved answer to {} ({})", path.display(), artifact.mime),
                Err(e) => {
                    tracing::error!("Failed to save answer: {}", e);
                    format!("Failed to save answer: {}", e)
                }
            };
            view.push_diagnostic(line);
        });
    };

    let history = view.history.read().clone();
    let is_empty = history.is_empty();
    let is_busy = *view.busy.read();
    let has_download = view.download.read().is_some();

    rsx! {
        div { class: "flex flex-col flex-1 min-h-0 relative",

            // Messages
            div { class: "flex-1 min-h-0 overflow-y-auto px-4 py-4 custom-scrollbar scroll-smooth",
                div { class: "max-w-3xl mx-auto w-full flex flex-col gap-1 pb-4",
                    if is_empty {
                        div { class: "text-center text-sm text-[var(--text-tertiary)] py-10 opacity-60",
                            "Start a conversation"
                        }
                    }
                    for (index, turn) in history.into_iter().enumerate() {
                        MessageBubble { key: "{index}-{turn.timestamp}", turn }
                    }
                    if is_busy {
                        div { class: "flex items-center gap-1.5 py-2 animate-fade-in",
                            div { class: "w-1.5 h-1.5 rounded-full bg-[var(--accent-primary)] opacity-60 animate-bounce" }
                            div { class: "w-1.5 h-1.5 rounded-full bg-[var(--accent-primary)] opacity-60 animate-bounce delay-75" }
                            div { class: "w-1.5 h-1.5 rounded-full bg-[var(--accent-primary)] opacity-60 animate-bounce delay-150" }
                        }
                    }
                }
            }

            if has_download {
                div { class: "max-w-3xl mx-auto w-full px-4",
                    button {
                        class: "text-xs px-3 py-1.5 rounded-lg border border-[var(--border-subtle)] hover:bg-white/[0.04]",
                        onclick: handle_save,
                        "Download answer (.txt)"
                    }
                }
            }

            ChatInput {
                on_send: handle_send,
                on_attach: handle_attach,
                is_busy,
            }
        }
    }
}

/// Where downloaded answers go
fn download_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
        .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
