//! Message bubble

use crate::session::FAILURE_PREFIX;
use crate::types::message::{ChatTurn, Role};
use dioxus::prelude::*;

fn format_time(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%d.%m. %H:%M").to_string())
        .unwrap_or_default()
}

#[component]
pub fn MessageBubble(turn: ChatTurn) -> Element {
    let is_user = turn.role == Role::User;
    let is_failure = !is_user && turn.content.starts_with(FAILURE_PREFIX);
    let label = if is_user { "You" } else { "AI" };
    let time = format_time(turn.timestamp);

    let row_class = if is_user {
        "flex justify-end py-1 animate-fade-in"
    } else {
        "flex justify-start py-1 animate-fade-in"
    };
    let bubble_style = match (is_user, is_failure) {
        (true, _) => "background: var(--accent-primary-10); border: 1px solid var(--accent-primary);",
        (false, true) => "background: rgba(200,60,60,0.08); border: 1px solid var(--error);",
        (false, false) => "background: rgba(242,237,231,0.03); border: 1px solid rgba(242,237,231,0.06);",
    };

    rsx! {
        div { class: "{row_class}",
            div {
                class: "max-w-[85%] rounded-2xl px-4 py-3",
                style: "{bubble_style}",
                div { class: "flex items-center gap-2 mb-1 text-[11px] text-[var(--text-tertiary)]",
                    span { class: "font-semibold uppercase tracking-wide", "{label}" }
                    span { class: "opacity-60", "{time}" }
                }
                pre {
                    class: "whitespace-pre-wrap break-words text-[15px] m-0",
                    style: "font-family: inherit;",
                    "{turn.content}"
                }
            }
        }
    }
}
