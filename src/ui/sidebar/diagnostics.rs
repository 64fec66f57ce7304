use crate::app::AppState;
use dioxus::prelude::*;

#[component]
pub fn ContextPreview() -> Element {
    let app_state = use_context::<AppState>();
    let text = app_state
        .view
        .context
        .read()
        .clone()
        .map(|summary| summary.lines().join("\n"))
        .unwrap_or_default();

    rsx! {
        div { class: "px-4 pb-4",
            h3 { class: "text-xs uppercase tracking-widest text-[var(--text-tertiary)] font-semibold mb-2",
                "Context"
            }
            pre { class: "text-xs whitespace-pre-wrap m-0 opacity-80",
                "{text}"
            }
        }
    }
}

#[component]
pub fn DiagnosticsPanel() -> Element {
    let app_state = use_context::<AppState>();
    let lines = app_state.view.diagnostics.read().clone();

    rsx! {
        div { class: "px-4 pb-4",
            h3 { class: "text-xs uppercase tracking-widest text-[var(--text-tertiary)] font-semibold mb-2",
                "Debug"
            }
            pre { class: "text-[11px] whitespace-pre-wrap m-0 opacity-60 max-h-48 overflow-y-auto",
                for (index, line) in lines.into_iter().enumerate() {
                    div { key: "{index}", "{line}" }
                }
            }
        }
    }
}
