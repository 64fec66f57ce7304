//! Chat input component - glass style with attach and send buttons inside

use crate::app::AppState;
use dioxus::html::HasFileData;
use dioxus::prelude::*;
use std::path::PathBuf;

/// Estimate how many rows the textarea needs based on content
fn compute_rows(text: &str) -> usize {
    let newlines = text.chars().filter(|&c| c == '\n').count();
    // Each visual line ~ 70 chars for our input width
    let wrap_lines: usize = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                0
            } else {
                (line.len().saturating_sub(1)) / 70
            }
        })
        .sum();
    let total = newlines + wrap_lines + 1;
    total.clamp(1, 8)
}

#[component]
pub fn ChatInput(
    on_send: EventHandler<String>,
    on_attach: EventHandler<PathBuf>,
    is_busy: bool,
) -> Element {
    let mut text = use_signal(String::new);
    let app_state = use_context::<AppState>();
    let view = app_state.view;
    let file_input_epoch = *view.file_input_epoch.read();
    let attachment_name = view
        .context
        .read()
        .clone()
        .and_then(|summary| summary.attachment_name);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
            evt.prevent_default();
            if !is_busy && !text().trim().is_empty() {
                on_send.call(text());
                text.set(String::new());
            }
        }
    };

    let handle_file = move |evt: FormEvent| {
        let Some(engine) = evt.files() else {
            return;
        };
        if let Some(first) = engine.files().into_iter().next() {
            on_attach.call(PathBuf::from(first));
        }
    };

    let can_send = !is_busy && !text().trim().is_empty();
    let rows = compute_rows(&text());
    let rows_str = format!("{}", rows);

    let send_class = if can_send {
        "flex-shrink-0 w-9 h-9 rounded-full flex items-center justify-center transition-all hover:scale-105 active:scale-95"
    } else {
        "flex-shrink-0 w-9 h-9 rounded-full flex items-center justify-center transition-all cursor-not-allowed opacity-30"
    };
    let send_style = if can_send {
        "background: var(--accent-primary); color: #F2EDE7;"
    } else {
        "background: var(--bg-elevated);"
    };

    rsx! {
        div {
            class: "w-full px-4 pb-5 pt-2",

            div {
                class: "relative max-w-3xl mx-auto",

                if let Some(name) = attachment_name {
                    div { class: "text-xs text-[var(--text-tertiary)] mb-1 px-4",
                        "📎 {name}"
                    }
                }

                div {
                    class: "glass-input flex items-end gap-2 px-2",
                    style: "border-radius: 28px; min-height: 52px;",

                    // Recreated after each send so the picked file is forgotten
                    for epoch in std::iter::once(file_input_epoch) {
                        label {
                            key: "{epoch}",
                            class: "flex-shrink-0 w-9 h-9 rounded-full flex items-center justify-center cursor-pointer hover:bg-white/[0.06] mb-2",
                            title: "Attach a .txt file",
                            "📎"
                            input {
                                r#type: "file",
                                accept: ".txt,text/plain",
                                class: "hidden",
                                onchange: handle_file,
                            }
                        }
                    }

                    textarea {
                        class: "flex-1 bg-transparent outline-none resize-none text-[15px] custom-scrollbar",
                        style: "line-height: 22px; padding: 14px 0; max-height: 180px; overflow-y: auto;",
                        placeholder: "Send a message...",
                        value: "{text}",
                        oninput: move |evt| text.set(evt.value()),
                        onkeydown: handle_keydown,
                        rows: "{rows_str}",
                    }

                    button {
                        onclick: move |_| {
                            if can_send {
                                on_send.call(text());
                                text.set(String::new());
                            }
                        },
                        disabled: !can_send,
                        class: "{send_class} mb-2",
                        style: "{send_style}",
                        title: "Send (Enter)",
                        "↑"
                    }
                }

                p {
                    class: "text-center text-[11px] text-[var(--text-tertiary)] mt-2 opacity-40",
                    "Enter to send, Shift+Enter for a new line"
                }
            }
        }
    }
}
