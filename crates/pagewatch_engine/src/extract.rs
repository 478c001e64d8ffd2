use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Minimum visible-text length for a cascade candidate to qualify.
pub const MIN_CONTENT_CHARS: usize = 50;

/// One step of the extraction cascade: a CSS selector plus the minimum
/// amount of visible text its match must carry to win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub selector: String,
    pub min_chars: usize,
}

impl ExtractionRule {
    pub fn new(selector: impl Into<String>, min_chars: usize) -> Self {
        Self {
            selector: selector.into(),
            min_chars,
        }
    }
}

/// The built-in cascade: semantic containers first, then the class-based
/// wrappers news sites commonly use.
pub fn default_rules() -> Vec<ExtractionRule> {
    ["article", "main", "section", ".news", ".content"]
        .into_iter()
        .map(|selector| ExtractionRule::new(selector, MIN_CONTENT_CHARS))
        .collect()
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> String;
}

/// Tries each rule in order and returns the visible text of the first match
/// that clears its minimum; falls back to the whole document's visible text
/// when nothing qualifies.
#[derive(Debug, Clone)]
pub struct CascadeExtractor {
    rules: Vec<ExtractionRule>,
}

impl CascadeExtractor {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }
}

impl Default for CascadeExtractor {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Extractor for CascadeExtractor {
    fn extract(&self, html: &str) -> String {
        let document = Html::parse_document(html);
        for rule in &self.rules {
            // Unparsable selectors are skipped; the full-document
            // fallback still applies.
            let Ok(selector) = Selector::parse(&rule.selector) else {
                continue;
            };
            if let Some(element) = document.select(&selector).next() {
                let text = visible_text(element);
                if text.chars().count() > rule.min_chars {
                    return text;
                }
            }
        }
        visible_text(document.root_element())
    }
}

/// Visible text under `element`: each text node trimmed, empty nodes
/// skipped, the rest joined with newlines. Script, style, and noscript
/// subtrees never contribute.
pub fn visible_text(element: ElementRef) -> String {
    let mut parts = Vec::new();
    collect_text(*element, &mut parts);
    parts.join("\n")
}

fn collect_text(node: NodeRef<Node>, parts: &mut Vec<String>) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Node::Element(element) => {
                if matches!(element.name(), "script" | "style" | "noscript") {
                    continue;
                }
                collect_text(child, parts);
            }
            _ => {}
        }
    }
}
