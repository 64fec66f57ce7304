//! Sidebar: conversation controls, preferences, context preview and diagnostics

pub mod diagnostics;

use crate::app::{AppState, GatewayStatus};
use crate::ui::settings::PreferencesPanel;
use diagnostics::{ContextPreview, DiagnosticsPanel};
use dioxus::prelude::*;

#[component]
pub fn Sidebar() -> Element {
    let app_state = use_context::<AppState>();
    let gateway = app_state.view.gateway.read().clone();
    let api_base = app_state.client.api_base().to_string();

    let (dot_color, gateway_label) = match gateway {
        GatewayStatus::Unknown => ("var(--text-tertiary)", "checking…"),
        GatewayStatus::Online => ("#4CAF50", "online"),
        GatewayStatus::Offline => ("var(--error)", "offline"),
    };

    let handle_new = {
        let app_state = app_state.clone();
        move |_| {
            let state = app_state.clone();
            spawn(async move {
                state.session.lock().await.on_new_chat();
            });
        }
    };

    rsx! {
        aside {
            class: "flex flex-col w-72 flex-none border-r border-[var(--border-subtle)] min-h-0",

            div { class: "p-3",
                button {
                    class: "w-full py-2 rounded-xl border border-[var(--border-subtle)] text-sm font-medium hover:bg-white/[0.04] transition-all",
                    onclick: handle_new,
                    "New conversation"
                }
                div {
                    class: "flex items-center gap-2 mt-3 text-[11px] text-[var(--text-tertiary)]",
                    title: "{api_base}",
                    div { class: "w-2 h-2 rounded-full", style: "background: {dot_color};" }
                    "Gateway {gateway_label}"
                }
            }

            div { class: "flex-1 overflow-y-auto scrollbar-thin",
                PreferencesPanel {}
                ContextPreview {}
                DiagnosticsPanel {}
            }
        }
    }
}
