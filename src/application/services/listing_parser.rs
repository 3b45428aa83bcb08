//! Text heuristics for the property-listing site.
//!
//! The index page is a site-builder layout that changes without notice, so
//! nothing here relies on classes or ids. Detail links are found by their
//! "Read More" label, and facts are matched against the page's flattened
//! visible text.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static H2_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

static RE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,5}\s+[A-Za-z0-9.\- ]+\b").unwrap());

const READ_MORE: &str = "read more";
const NON_VISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Facts scraped from one property detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFacts {
    pub name: String,
    pub address: Option<String>,
    pub allows_cats: Option<bool>,
    pub allows_dogs: Option<bool>,
    pub senior_55_plus: Option<bool>,
}

/// Finds every "Read More" link on the index page, resolved against `base`
/// and deduplicated in discovery order.
pub fn find_read_more_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let label = element_text(anchor);
        if !label.to_lowercase().contains(READ_MORE) {
            continue;
        }

        let href = anchor.value().attr("href").unwrap_or("").trim();
        if href.is_empty() {
            continue;
        }

        if let Ok(url) = base.join(href) {
            if seen.insert(url.as_str().to_string()) {
                links.push(url);
            }
        }
    }

    links
}

pub fn parse_detail_page(html: &str, details_url: &Url) -> DetailFacts {
    let document = Html::parse_document(html);
    let page_text = flatten_text(&document);

    let name = page_title(&document).unwrap_or_else(|| name_from_url(details_url));

    DetailFacts {
        name,
        address: extract_address(&page_text),
        allows_cats: phrase_flag(&page_text, "cats allowed"),
        allows_dogs: phrase_flag(&page_text, "dogs allowed"),
        senior_55_plus: senior_flag(&page_text),
    }
}

/// All visible text nodes, trimmed and joined with single spaces.
pub fn flatten_text(document: &Html) -> String {
    let mut parts = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| NON_VISIBLE.contains(&el.name()));
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

/// First street-number-looking run in the text.
pub fn extract_address(page_text: &str) -> Option<String> {
    RE_ADDRESS
        .find(page_text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|address| !address.is_empty())
}

/// `Some(true)` when the phrase appears anywhere (case-insensitive), else
/// unknown. Absence is never read as a "no".
pub fn phrase_flag(page_text: &str, phrase: &str) -> Option<bool> {
    page_text
        .to_lowercase()
        .contains(&phrase.to_lowercase())
        .then_some(true)
}

/// Coarse: "55" and "senior" anywhere on the page, not necessarily together.
pub fn senior_flag(page_text: &str) -> Option<bool> {
    (page_text.contains("55") && page_text.to_lowercase().contains("senior"))
        .then_some(true)
}

fn page_title(document: &Html) -> Option<String> {
    document
        .select(&H1_SELECTOR)
        .next()
        .or_else(|| document.select(&H2_SELECTOR).next())
        .map(element_text)
        .filter(|title| !title.is_empty())
}

fn name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|segment| segment.to_string())
        .unwrap_or_else(|| url.as_str().to_string())
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
