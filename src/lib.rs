//! Fura Chat library
//!
//! Conversation session core and the Dioxus desktop shell around it.

pub mod app;
pub mod session;
pub mod storage;
pub mod types;
pub mod ui;
