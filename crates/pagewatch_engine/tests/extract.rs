use pagewatch_engine::{default_rules, CascadeExtractor, ExtractionRule, Extractor};
use pretty_assertions::assert_eq;

const NOTICE: &str = "Lecture schedules for the autumn term have been published on the department board.";

#[test]
fn article_wins_over_later_rules() {
    let html = format!(
        r#"<html><body>
        <article><p>{NOTICE}</p></article>
        <div class="content"><p>Unrelated sidebar content that is also long enough to qualify here.</p></div>
        </body></html>"#
    );
    let extractor = CascadeExtractor::default();
    assert_eq!(extractor.extract(&html), NOTICE);
}

#[test]
fn short_candidate_falls_through_to_next_rule() {
    let html = format!(
        r#"<html><body>
        <article>stub</article>
        <main><p>{NOTICE}</p></main>
        </body></html>"#
    );
    let extractor = CascadeExtractor::default();
    assert_eq!(extractor.extract(&html), NOTICE);
}

#[test]
fn site_specific_rule_takes_priority_when_prepended() {
    let html = format!(
        r#"<html><body>
        <article><p>A general container that would normally win the cascade outright.</p></article>
        <div id="staff-announcements"><p>{NOTICE}</p></div>
        </body></html>"#
    );
    let mut rules = vec![ExtractionRule::new("#staff-announcements", 50)];
    rules.extend(default_rules());
    let extractor = CascadeExtractor::new(rules);
    assert_eq!(extractor.extract(&html), NOTICE);
}

#[test]
fn falls_back_to_whole_document_text() {
    let html = r#"<html><head><title>Departmental news</title></head>
        <body><p>One short line.</p><p>Another.</p></body></html>"#;
    let extractor = CascadeExtractor::default();
    let text = extractor.extract(html);
    assert_eq!(text, "Departmental news\nOne short line.\nAnother.");
}

#[test]
fn script_and_style_do_not_count_as_content() {
    let html = format!(
        r#"<html><body>
        <article>
            <script>var tracker = "should never surface";</script>
            <style>.hidden {{ display: none; }}</style>
            <p>{NOTICE}</p>
        </article>
        </body></html>"#
    );
    let extractor = CascadeExtractor::default();
    let text = extractor.extract(&html);
    assert_eq!(text, NOTICE);
    assert!(!text.contains("tracker"));
}

#[test]
fn text_nodes_are_trimmed_and_joined_with_newlines() {
    let html = r#"<html><body><article>
        <h1>  Announcements  </h1>
        <p>
            Office hours move to Tuesday afternoon starting next week, room B12.
        </p>
    </article></body></html>"#;
    let extractor = CascadeExtractor::default();
    assert_eq!(
        extractor.extract(html),
        "Announcements\nOffice hours move to Tuesday afternoon starting next week, room B12."
    );
}

#[test]
fn unparsable_selector_is_skipped() {
    let html = format!(r#"<html><body><main><p>{NOTICE}</p></main></body></html>"#);
    let mut rules = vec![ExtractionRule::new(":::not-a-selector", 50)];
    rules.extend(default_rules());
    let extractor = CascadeExtractor::new(rules);
    assert_eq!(extractor.extract(&html), NOTICE);
}
