// src/checker/html.rs
// =============================================================================
// This module extracts references and ids from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// What we collect, per element, in document order:
// - <a>, <link>: the `href` attribute
// - <script>, <img>, <source>: the `src` attribute, plus every URL listed
//   in `srcset`
// - any element: its `id`, counted so duplicates can be reported
//
// References are kept exactly as written; cleanup and classification
// happen later in `classify`.
// =============================================================================

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::site::PageLinks;

// Every element in the document, nested ones included.
static ALL_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("*").expect("`*` is a valid selector"));

/// Parses `html` and collects its references and id counts.
pub fn extract_page_links(html: &str) -> PageLinks {
    let document = Html::parse_document(html);
    extract_document_links(&document)
}

/// Same as [`extract_page_links`] for an already parsed document.
pub fn extract_document_links(document: &Html) -> PageLinks {
    let mut links = PageLinks::default();
    for element in document.select(&ALL_ELEMENTS) {
        visit_element(element, &mut links);
    }
    links
}

fn visit_element(element: ElementRef<'_>, links: &mut PageLinks) {
    let element = element.value();
    let name = element.name();

    if is_any(name, &["a", "link"]) {
        if let Some(href) = element.attr("href") {
            links.add_reference(href);
        }
    } else if is_any(name, &["script", "img", "source"]) {
        if let Some(src) = element.attr("src") {
            links.add_reference(src);
        }
        if let Some(srcset) = element.attr("srcset") {
            for url in srcset_urls(srcset) {
                links.add_reference(url);
            }
        }
    }

    if let Some(id) = element.attr("id") {
        links.add_id(id);
    }
}

fn is_any(name: &str, tags: &[&str]) -> bool {
    tags.iter().any(|tag| name.eq_ignore_ascii_case(tag))
}

// Splits a srcset on commas and keeps each candidate's URL: everything
// before the last space, or the whole candidate when there is no space.
fn srcset_urls(srcset: &str) -> impl Iterator<Item = &str> {
    srcset.split(',').map(|candidate| match candidate.rfind(' ') {
        Some(index) => &candidate[..index],
        None => candidate,
    })
}
