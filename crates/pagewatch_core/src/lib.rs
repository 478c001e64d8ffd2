//! Pagewatch core: pure change-detection logic, no I/O.
mod diff;
mod gate;
mod message;
mod snippet;
mod state;

pub use diff::detect_changes;
pub use gate::ActiveHours;
pub use message::{build_notification, MESSAGE_HEADER, SNIPPET_MESSAGE_CHARS};
pub use snippet::{capture_snippet, clip_chars, SNIPPET_CAPTURE_CHARS};
pub use state::{fingerprint_map, ChangeEvent, FingerprintMap, PageCapture};
