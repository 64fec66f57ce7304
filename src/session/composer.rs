//! Prompt composition
//!
//! Merges the typed prompt with an attached document.

/// Separator between the authored prompt and attached material in the outbound message
pub const ATTACHMENT_SEPARATOR: &str = "\n\n---\nAttached file (text):\n";

/// Marker used for the attachment in the local transcript
pub const TRANSCRIPT_MARKER: &str = "\n\n[Attached TXT]\n";

/// Build the outbound message content. The attachment is never truncated.
pub fn compose(user_text: &str, attachment: Option<&str>) -> String {
    match attachment {
        Some(text) if !text.is_empty() => {
            format!("{}{}{}", user_text, ATTACHMENT_SEPARATOR, text)
        }
        _ => user_text.to_string(),
    }
}

/// Build the user turn as shown in the history log
pub fn history_entry(user_text: &str, attachment: Option<&str>) -> String {
    match attachment {
        Some(text) if !text.is_empty() => format!("{}{}{}", user_text, TRANSCRIPT_MARKER, text),
        _ => user_text.to_string(),
    }
}
