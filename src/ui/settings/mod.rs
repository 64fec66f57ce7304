#![allow(non_snake_case)]

//! Preference controls: credential, model selection, memory scope, web search

use crate::app::AppState;
use crate::session::PreferenceChange;
use crate::types::config::{MemoryScope, DEFAULT_MODEL};
use crate::types::model::{find_model, model_catalog};
use dioxus::prelude::*;

pub fn PreferencesPanel() -> Element {
    let app_state = use_context::<AppState>();
    let summary = app_state.view.context.read().clone();
    let mut api_key_input = use_signal(String::new);

    let logged_in = summary.as_ref().map(|s| s.logged_in).unwrap_or(false);
    let auto_model = summary.as_ref().map(|s| s.model.is_none()).unwrap_or(true);
    let selected_model = summary
        .as_ref()
        .map(|s| s.selected_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let memory = summary
        .as_ref()
        .map(|s| s.memory_scope)
        .unwrap_or_default();
    let websearch = summary.as_ref().map(|s| s.websearch).unwrap_or(false);
    let model_tip = find_model(&selected_model).map(|m| m.tip);

    let change = {
        let app_state = app_state.clone();
        move |change: PreferenceChange| {
            let state = app_state.clone();
            spawn(async move {
                state.session.lock().await.on_preference_changed(change);
            });
        }
    };

    let app_state_key = app_state.clone();
    let app_state_logout = app_state.clone();
    let change_auto = change.clone();
    let change_model = change.clone();
    let change_memory = change.clone();
    let change_websearch = change;

    rsx! {
        div {
            class: "space-y-5 p-4",

            // Credential
            div {
                h3 { class: "text-xs uppercase tracking-widest text-[var(--text-tertiary)] font-semibold mb-2",
                    "API key"
                }
                if logged_in {
                    div { class: "flex items-center justify-between text-sm",
                        span { "Signed in" }
                        button {
                            class: "text-xs px-2 py-1 rounded-md hover:bg-white/[0.06]",
                            onclick: move |_| {
                                let state = app_state_logout.clone();
                                spawn(async move {
                                    state.session.lock().await.on_logout();
                                });
                            },
                            "Log out"
                        }
                    }
                } else {
                    div { class: "flex gap-2",
                        input {
                            r#type: "password",
                            class: "flex-1 min-w-0 px-2 py-1 rounded-md bg-white/[0.04] text-sm outline-none",
                            placeholder: "X-API-Key",
                            value: "{api_key_input}",
                            oninput: move |evt| api_key_input.set(evt.value()),
                        }
                        button {
                            class: "text-xs px-2 py-1 rounded-md border border-[var(--border-subtle)]",
                            onclick: move |_| {
                                let key = api_key_input();
                                if key.trim().is_empty() {
                                    return;
                                }
                                let state = app_state_key.clone();
                                spawn(async move {
                                    state.session.lock().await.on_save_api_key(&key);
                                });
                                api_key_input.set(String::new());
                            },
                            "Save"
                        }
                    }
                }
            }

            // Model
            div {
                h3 { class: "text-xs uppercase tracking-widest text-[var(--text-tertiary)] font-semibold mb-2",
                    "Model"
                }
                label { class: "flex items-center gap-2 text-sm mb-2 cursor-pointer",
                    input {
                        r#type: "checkbox",
                        checked: auto_model,
                        onchange: move |_| change_auto(PreferenceChange::AutoModel(!auto_model)),
                    }
                    "Choose automatically"
                }
                select {
                    class: "w-full px-2 py-1 rounded-md bg-white/[0.04] text-sm",
                    disabled: auto_model,
                    value: "{selected_model}",
                    onchange: move |evt| change_model(PreferenceChange::Model(evt.value())),
                    for model in model_catalog() {
                        option {
                            key: "{model.id}",
                            value: "{model.id}",
                            selected: model.id == selected_model,
                            title: "{model.tip}",
                            "{model.label}"
                        }
                    }
                }
                if let Some(tip) = model_tip {
                    if !auto_model {
                        p { class: "text-[11px] text-[var(--text-tertiary)] mt-1", "{tip}" }
                    }
                }
            }

            // Memory scope
            div {
                h3 { class: "text-xs uppercase tracking-widest text-[var(--text-tertiary)] font-semibold mb-2",
                    "Memory"
                }
                div { class: "flex gap-4 text-sm",
                    for scope in MemoryScope::ALL {
                        label {
                            key: "{scope.as_str()}",
                            class: "flex items-center gap-1.5 cursor-pointer",
                            input {
                                r#type: "radio",
                                name: "memory",
                                value: "{scope.as_str()}",
                                checked: scope == memory,
                                onchange: {
                                    let change = change_memory.clone();
                                    move |_| change(PreferenceChange::Memory(scope))
                                },
                            }
                            "{scope.as_str()}"
                        }
                    }
                }
            }

            // Web search
            label { class: "flex items-center gap-2 text-sm cursor-pointer",
                input {
                    r#type: "checkbox",
                    checked: websearch,
                    onchange: move |_| change_websearch(PreferenceChange::Websearch(!websearch)),
                }
                "Web search"
            }
        }
    }
}
