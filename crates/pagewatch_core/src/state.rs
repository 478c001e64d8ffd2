use std::collections::BTreeMap;

/// Mapping from monitored URL to the fingerprint observed on the last
/// successful fetch. This is the only state that survives between runs.
pub type FingerprintMap = BTreeMap<String, String>;

/// Result of one successful fetch within a run: the page's fingerprint and
/// the extracted text it was computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCapture {
    pub url: String,
    pub fingerprint: String,
    pub text: String,
}

/// A page whose fingerprint moved since the previous run. Consumed once to
/// build the notification message, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub url: String,
    pub snippet: String,
}

/// Builds the mapping to persist from this run's captures.
///
/// URLs that failed every fetch attempt have no capture, so they are
/// dropped rather than carried over from the previous mapping.
pub fn fingerprint_map(captures: &[PageCapture]) -> FingerprintMap {
    captures
        .iter()
        .map(|capture| (capture.url.clone(), capture.fingerprint.clone()))
        .collect()
}
