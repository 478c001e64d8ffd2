use std::sync::Once;

use pagewatch_core::{
    detect_changes, fingerprint_map, FingerprintMap, PageCapture, SNIPPET_CAPTURE_CHARS,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

fn capture(url: &str, fingerprint: &str, text: &str) -> PageCapture {
    PageCapture {
        url: url.to_string(),
        fingerprint: fingerprint.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn first_observation_produces_no_event() {
    init_logging();
    let previous = FingerprintMap::new();
    let captures = vec![capture("https://a.example/", "h1", "fresh content")];

    let changes = detect_changes(&previous, &captures);
    assert_eq!(changes, Vec::new());

    let next = fingerprint_map(&captures);
    assert_eq!(next.get("https://a.example/").map(String::as_str), Some("h1"));
}

#[test]
fn unchanged_fingerprint_produces_no_event() {
    init_logging();
    let previous: FingerprintMap =
        [("https://a.example/".to_string(), "h1".to_string())].into();
    let captures = vec![capture("https://a.example/", "h1", "same content")];

    assert_eq!(detect_changes(&previous, &captures), Vec::new());
    assert_eq!(fingerprint_map(&captures), previous);
}

#[test]
fn changed_fingerprint_produces_one_event_with_snippet() {
    init_logging();
    let previous: FingerprintMap =
        [("https://a.example/".to_string(), "h1".to_string())].into();
    let captures = vec![capture("https://a.example/", "h2", "new notice\nsecond line")];

    let changes = detect_changes(&previous, &captures);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].url, "https://a.example/");
    assert_eq!(changes[0].snippet, "new notice second line");

    let next = fingerprint_map(&captures);
    assert_eq!(next.get("https://a.example/").map(String::as_str), Some("h2"));
}

#[test]
fn second_pass_over_own_output_is_quiet() {
    init_logging();
    let captures = vec![
        capture("https://a.example/", "h1", "alpha"),
        capture("https://b.example/", "h2", "beta"),
    ];
    let previous = fingerprint_map(&captures);

    // An unchanged remote page fingerprints identically on the next run.
    assert_eq!(detect_changes(&previous, &captures), Vec::new());
}

#[test]
fn url_missing_from_captures_is_dropped_from_new_state() {
    init_logging();
    let previous: FingerprintMap = [
        ("https://a.example/".to_string(), "h1".to_string()),
        ("https://b.example/".to_string(), "h2".to_string()),
    ]
    .into();
    // b failed every fetch attempt this run, so it has no capture.
    let captures = vec![capture("https://a.example/", "h1", "alpha")];

    let next = fingerprint_map(&captures);
    assert!(!next.contains_key("https://b.example/"));

    // When b recovers it is treated as a first observation again, even if
    // its content changed while it was unreachable.
    let recovered = vec![capture("https://b.example/", "h3", "changed while away")];
    assert_eq!(detect_changes(&next, &recovered), Vec::new());
}

#[test]
fn snippet_is_bounded_even_for_huge_pages() {
    init_logging();
    let previous: FingerprintMap =
        [("https://a.example/".to_string(), "h1".to_string())].into();
    let text = "parola ".repeat(500);
    let captures = vec![capture("https://a.example/", "h2", &text)];

    let changes = detect_changes(&previous, &captures);
    assert_eq!(changes[0].snippet.chars().count(), SNIPPET_CAPTURE_CHARS);
}
