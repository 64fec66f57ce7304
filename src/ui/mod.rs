//! UI components for Fura Chat
//!
//! This module contains all user interface components built with Dioxus.

pub mod chat;
mod layout;
pub mod settings;
pub mod sidebar;

pub use layout::Layout;
