//! Thin query helpers over parsed HTML.
//!
//! The `scraper` crate does the heavy lifting; these helpers wrap the three
//! queries the pipeline actually needs (first-match trimmed text, first-match
//! attribute, first-match inner HTML) so the scrape loop stays readable.
//!
//! Selectors arriving here have already been compiled once during config
//! validation, so `Selector::parse` failures are not expected; a selector
//! that somehow fails to compile behaves like a selector that matched
//! nothing.

use scraper::{ElementRef, Html, Selector};

/// Compile a selector that config validation has already accepted.
fn compile(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// Trimmed text content of the first `selector` match inside `element`.
///
/// Returns an empty string when nothing matches; a missing field is a normal
/// outcome, not a failure.
pub fn first_text(element: ElementRef<'_>, selector: &str) -> String {
    let Some(sel) = compile(selector) else {
        return String::new();
    };
    element
        .select(&sel)
        .next()
        .map(|m| m.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .unwrap_or_default()
}

/// Value of `attr` on the first `selector` match inside `element`.
pub fn first_attr(element: ElementRef<'_>, selector: &str, attr: &str) -> Option<String> {
    let sel = compile(selector)?;
    element
        .select(&sel)
        .next()
        .and_then(|m| m.value().attr(attr))
        .map(str::to_string)
}

/// Inner HTML of the first `selector` match in `document`.
///
/// First-match semantics: when the selector matches several elements only
/// the first contributes, matches are never concatenated.
pub fn first_inner_html(document: &Html, selector: &str) -> Option<String> {
    let sel = compile(selector)?;
    document.select(&sel).next().map(|m| m.inner_html())
}
