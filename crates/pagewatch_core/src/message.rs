use std::fmt::Write;

use crate::snippet::clip_chars;
use crate::state::ChangeEvent;

/// Leading line of the aggregated notification, in Telegram HTML mode.
pub const MESSAGE_HEADER: &str = "⬆️ <b>Updates detected</b>:\n\n";

/// Per-change snippet cap inside the aggregated message.
pub const SNIPPET_MESSAGE_CHARS: usize = 400;

/// Builds the single aggregated notification for a run: the header, then
/// one block per changed page (URL, newline, clipped snippet).
///
/// The caller sends the result through the notifier exactly once per run,
/// however many pages changed.
pub fn build_notification(changes: &[ChangeEvent]) -> String {
    let mut message = String::from(MESSAGE_HEADER);
    for change in changes {
        let _ = write!(
            message,
            "{}\n{}...\n\n",
            change.url,
            clip_chars(&change.snippet, SNIPPET_MESSAGE_CHARS)
        );
    }
    message
}
