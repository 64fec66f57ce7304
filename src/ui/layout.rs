use crate::ui::chat::ChatView;
use crate::ui::sidebar::Sidebar;
use dioxus::prelude::*;

#[component]
pub fn Layout() -> Element {
    rsx! {
        div {
            class: "flex h-screen w-screen overflow-hidden bg-[var(--bg-base)] text-[var(--text-primary)]",
            style: "font-family: system-ui, sans-serif;",

            Sidebar {}

            main {
                class: "flex flex-col flex-1 min-w-0",
                ChatView {}
            }
        }
    }
}
