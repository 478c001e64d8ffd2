use crate::snippet::capture_snippet;
use crate::state::{ChangeEvent, FingerprintMap, PageCapture};

/// Compares this run's captures against the previous run's mapping.
///
/// A capture produces a [`ChangeEvent`] only when its URL was already known
/// and the fingerprint moved. A URL seen for the first time establishes
/// baseline state without producing an event.
pub fn detect_changes(previous: &FingerprintMap, captures: &[PageCapture]) -> Vec<ChangeEvent> {
    captures
        .iter()
        .filter_map(|capture| match previous.get(&capture.url) {
            Some(known) if *known != capture.fingerprint => Some(ChangeEvent {
                url: capture.url.clone(),
                snippet: capture_snippet(&capture.text),
            }),
            _ => None,
        })
        .collect()
}
